use payload_board::{BusError, SensorDriverServices};

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("i2c bus error: {0}")]
    Bus(BusError),
    #[error("unexpected chip id 0x{found:02X} (expected 0x{expected:02X})")]
    UnexpectedChipId { expected: u8, found: u8 },
    #[error("crc mismatch")]
    Crc,
    #[error("self test failed with 0x{0:04X}")]
    SelfTest(u16),
    #[error("timed out waiting for data")]
    Timeout,
    #[error("invalid calibration data")]
    Calibration,
}

impl From<BusError> for SensorError {
    fn from(error: BusError) -> Self {
        SensorError::Bus(error)
    }
}

/// Handshake shared by every driver. A driver whose setup fails is never read.
pub trait SensorDriver {
    fn get_name(&self) -> &'static str;
    fn setup(&mut self, board: &mut dyn SensorDriverServices) -> Result<(), SensorError>;
}

/// Pressure / temperature sensor. Returns (temperature °C, pressure hPa).
pub trait BarometricSensor: SensorDriver {
    fn read_temperature_pressure(
        &mut self,
        board: &mut dyn SensorDriverServices,
    ) -> Result<(f64, f64), SensorError>;
}

/// Gas sensor reporting an uncompensated raw index.
pub trait AirQualitySensor: SensorDriver {
    fn read_raw(&mut self, board: &mut dyn SensorDriverServices) -> Result<u16, SensorError>;
}

/// Humidity / temperature sensor. Returns (relative humidity %, temperature °C).
pub trait HygrometerSensor: SensorDriver {
    fn read_humidity_temperature(
        &mut self,
        board: &mut dyn SensorDriverServices,
    ) -> Result<(f64, f64), SensorError>;
}

// register helpers for drivers with an 8 bit register map

pub(crate) fn read_registers(
    board: &mut dyn SensorDriverServices,
    address: u8,
    register: u8,
    buffer: &mut [u8],
) -> Result<(), SensorError> {
    board.ic2_write_read(address, &[register], buffer)?;
    Ok(())
}

pub(crate) fn read_register(
    board: &mut dyn SensorDriverServices,
    address: u8,
    register: u8,
) -> Result<u8, SensorError> {
    let mut buffer = [0_u8; 1];
    read_registers(board, address, register, &mut buffer)?;
    Ok(buffer[0])
}

pub(crate) fn write_register(
    board: &mut dyn SensorDriverServices,
    address: u8,
    register: u8,
    value: u8,
) -> Result<(), SensorError> {
    board.ic2_write(address, &[register, value])?;
    Ok(())
}
