use stm32f1xx_hal::{
    afio::MAPR,
    pac::USART2,
    prelude::*,
    rcc::Clocks,
    serial::{Config, Serial, Tx},
};

use crate::pin_groups;

pub const TELEMETRY_BAUD: u32 = 115200;

/// Only the transmit half is kept; the payload never listens to the flight computer.
pub fn setup_serial(
    pins: pin_groups::SerialPins,
    mapr: &mut MAPR,
    usart: USART2,
    clocks: &Clocks,
) -> Tx<USART2> {
    let serial = Serial::new(
        usart,
        (pins.tx, pins.rx),
        mapr,
        Config::default().baudrate(TELEMETRY_BAUD.bps()),
        clocks,
    );
    serial.tx
}
