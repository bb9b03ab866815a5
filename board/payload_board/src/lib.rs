#![cfg_attr(not(test), no_std)]

pub use embedded_hal::i2c::{ErrorKind as BusError, NoAcknowledgeSource};

pub const BOARD_ID_SIZE: usize = 32;

/// Services a payload board offers to the telemetry loop.
pub trait PayloadBoard {
    fn serial_send(&mut self, string: &str);
    fn delay_ms(&mut self, ms: u32);
    /// NUL padded, ascii
    fn get_board_id(&mut self) -> [u8; BOARD_ID_SIZE];
    fn get_sensor_driver_services(&mut self) -> &mut dyn SensorDriverServices;
}

/// The subset of the board lent to sensor drivers for the duration of one call.
/// The board owns the bus, so a driver only ever sees it through this borrow.
pub trait SensorDriverServices {
    fn ic2_read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), BusError>;
    fn ic2_write(&mut self, addr: u8, message: &[u8]) -> Result<(), BusError>;
    fn ic2_write_read(
        &mut self,
        addr: u8,
        message: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), BusError>;
    fn delay_ms(&mut self, ms: u32);
}
