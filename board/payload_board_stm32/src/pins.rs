use stm32f1xx_hal::gpio::*;

pub struct GpioCr {
    pub gpioa_crl: Cr<'A', false>,
    pub gpiob_crl: Cr<'B', false>,
}
