use stm32f1xx_hal::{
    afio::MAPR,
    i2c::{self, BlockingI2c, Mode},
    pac::I2C1,
    prelude::*,
    rcc::Clocks,
};

use payload_board::{BusError, NoAcknowledgeSource};

use crate::pin_groups::{self, I2c1Scl, I2c1Sda};

pub type BoardI2c1 = BlockingI2c<I2C1, (I2c1Scl, I2c1Sda)>;

pub fn setup_i2c1(pins: pin_groups::I2c1Pins, i2c1: I2C1, mapr: &mut MAPR, clocks: &Clocks) -> BoardI2c1 {
    BlockingI2c::i2c1(
        i2c1,
        (pins.i2c1_scl, pins.i2c1_sda),
        mapr,
        Mode::Standard {
            frequency: 100.kHz(),
        },
        *clocks,
        1000,
        10,
        1000,
        1000,
    )
}

pub fn bus_error(error: i2c::Error) -> BusError {
    match error {
        i2c::Error::Bus => BusError::Bus,
        i2c::Error::Arbitration => BusError::ArbitrationLoss,
        i2c::Error::Acknowledge => BusError::NoAcknowledge(NoAcknowledgeSource::Unknown),
        i2c::Error::Overrun => BusError::Overrun,
        _ => BusError::Other,
    }
}
