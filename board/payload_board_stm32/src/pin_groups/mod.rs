mod i2c1;
pub use i2c1::*;
mod serial;
pub use serial::*;

use stm32f1xx_hal::gpio::Pin;

use crate::pins::GpioCr;

pub fn build(
    i2c1_scl: Pin<'B', 6>,
    i2c1_sda: Pin<'B', 7>,
    serial_tx: Pin<'A', 2>,
    serial_rx: Pin<'A', 3>,
    cr: &mut GpioCr,
) -> (I2c1Pins, SerialPins) {
    let i2c1 = I2c1Pins::build(i2c1_scl, i2c1_sda, cr);
    let serial = SerialPins::build(serial_tx, serial_rx, cr);
    (i2c1, serial)
}
