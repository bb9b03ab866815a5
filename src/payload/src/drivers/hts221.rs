use payload_board::SensorDriverServices;

use super::types::*;

pub const HTS221_I2CADDR_DEFAULT: u8 = 0x5F;

const HTS221_CHIP_ID: u8 = 0xBC;

const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL_REG1: u8 = 0x20;
const REG_HUMIDITY_OUT_L: u8 = 0x28;
const REG_CALIBRATION: u8 = 0x30;

const AUTO_INCREMENT: u8 = 0x80; // sub-address msb enables multi byte reads
const CTRL_REG1_ACTIVE: u8 = 0x87; // power on | block data update | 12.5 Hz

const CALIBRATION_SIZE: usize = 16;

/// Two point calibration lines stored in the device at the factory.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hts221Calibration {
    humidity_0: f64,
    humidity_1: f64,
    humidity_0_out: f64,
    humidity_1_out: f64,
    temperature_0: f64,
    temperature_1: f64,
    temperature_0_out: f64,
    temperature_1_out: f64,
}

impl Hts221Calibration {
    pub fn new_from_bytes(bytes: &[u8; CALIBRATION_SIZE]) -> Result<Self, SensorError> {
        let i16_at = |i: usize| i16::from_le_bytes([bytes[i], bytes[i + 1]]) as f64;

        let msb = bytes[5] as u16;
        let temperature_0_x8 = (msb & 0x03) << 8 | bytes[2] as u16;
        let temperature_1_x8 = (msb & 0x0C) << 6 | bytes[3] as u16;

        let calibration = Self {
            humidity_0: bytes[0] as f64 / 2.0,
            humidity_1: bytes[1] as f64 / 2.0,
            humidity_0_out: i16_at(6),
            humidity_1_out: i16_at(10),
            temperature_0: temperature_0_x8 as f64 / 8.0,
            temperature_1: temperature_1_x8 as f64 / 8.0,
            temperature_0_out: i16_at(12),
            temperature_1_out: i16_at(14),
        };

        if calibration.humidity_0_out == calibration.humidity_1_out
            || calibration.temperature_0_out == calibration.temperature_1_out
        {
            return Err(SensorError::Calibration);
        }
        Ok(calibration)
    }

    pub fn humidity(&self, raw: i16) -> f64 {
        let humidity = self.humidity_0
            + (raw as f64 - self.humidity_0_out) * (self.humidity_1 - self.humidity_0)
                / (self.humidity_1_out - self.humidity_0_out);
        humidity.clamp(0.0, 100.0)
    }

    pub fn temperature(&self, raw: i16) -> f64 {
        self.temperature_0
            + (raw as f64 - self.temperature_0_out) * (self.temperature_1 - self.temperature_0)
                / (self.temperature_1_out - self.temperature_0_out)
    }
}

pub struct Hts221 {
    address: u8,
    calibration: Hts221Calibration,
}

impl Hts221 {
    pub fn new() -> Self {
        Hts221 {
            address: HTS221_I2CADDR_DEFAULT,
            calibration: Hts221Calibration::default(),
        }
    }
}

impl SensorDriver for Hts221 {
    fn get_name(&self) -> &'static str {
        "HTS221"
    }

    fn setup(&mut self, board: &mut dyn SensorDriverServices) -> Result<(), SensorError> {
        let chip_id = read_register(board, self.address, REG_WHO_AM_I)?;
        if chip_id != HTS221_CHIP_ID {
            return Err(SensorError::UnexpectedChipId {
                expected: HTS221_CHIP_ID,
                found: chip_id,
            });
        }

        let mut bytes = [0_u8; CALIBRATION_SIZE];
        read_registers(board, self.address, REG_CALIBRATION | AUTO_INCREMENT, &mut bytes)?;
        self.calibration = Hts221Calibration::new_from_bytes(&bytes)?;

        // continuous conversion, so reads never wait on the device
        write_register(board, self.address, REG_CTRL_REG1, CTRL_REG1_ACTIVE)
    }
}

impl HygrometerSensor for Hts221 {
    fn read_humidity_temperature(
        &mut self,
        board: &mut dyn SensorDriverServices,
    ) -> Result<(f64, f64), SensorError> {
        let mut data = [0_u8; 4];
        read_registers(board, self.address, REG_HUMIDITY_OUT_L | AUTO_INCREMENT, &mut data)?;
        let humidity_raw = i16::from_le_bytes([data[0], data[1]]);
        let temperature_raw = i16::from_le_bytes([data[2], data[3]]);

        Ok((
            self.calibration.humidity(humidity_raw),
            self.calibration.temperature(temperature_raw),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestBoard;

    // 20 %rH at 0 counts, 80 %rH at 6000; 10 °C at 0 counts, 30 °C at 1000
    fn calibration_bytes() -> [u8; CALIBRATION_SIZE] {
        let mut bytes = [0_u8; CALIBRATION_SIZE];
        bytes[0] = 40;
        bytes[1] = 160;
        bytes[2] = 80;
        bytes[3] = 240;
        bytes[10..12].copy_from_slice(&6000_i16.to_le_bytes());
        bytes[14..16].copy_from_slice(&1000_i16.to_le_bytes());
        bytes
    }

    fn board_with_hts221() -> TestBoard {
        let mut board = TestBoard::new();
        let registers = board.add_register_device(HTS221_I2CADDR_DEFAULT);
        registers[REG_WHO_AM_I as usize] = HTS221_CHIP_ID;
        let calibration = REG_CALIBRATION as usize;
        registers[calibration..calibration + CALIBRATION_SIZE].copy_from_slice(&calibration_bytes());
        let data = REG_HUMIDITY_OUT_L as usize;
        registers[data..data + 2].copy_from_slice(&2500_i16.to_le_bytes());
        registers[data + 2..data + 4].copy_from_slice(&600_i16.to_le_bytes());
        board
    }

    #[test]
    fn test_temperature_msb_bits() {
        let mut bytes = calibration_bytes();
        bytes[5] = 0b0000_0101; // T0 msb = 1, T1 msb = 1
        let calibration = Hts221Calibration::new_from_bytes(&bytes).unwrap();
        assert_eq!((256.0 + 80.0) / 8.0, calibration.temperature_0);
        assert_eq!((256.0 + 240.0) / 8.0, calibration.temperature_1);
    }

    #[test]
    fn test_flat_calibration_rejected() {
        assert_eq!(
            Err(SensorError::Calibration),
            Hts221Calibration::new_from_bytes(&[0; CALIBRATION_SIZE])
        );
    }

    #[test]
    fn test_humidity_is_clamped() {
        let calibration = Hts221Calibration::new_from_bytes(&calibration_bytes()).unwrap();
        assert_eq!(100.0, calibration.humidity(i16::MAX));
        assert_eq!(0.0, calibration.humidity(i16::MIN));
    }

    #[test]
    fn test_setup_and_read() {
        let mut board = board_with_hts221();
        let mut hts221 = Hts221::new();
        assert_eq!(Ok(()), hts221.setup(&mut board));
        assert!(board.was_written(HTS221_I2CADDR_DEFAULT, &[REG_CTRL_REG1, CTRL_REG1_ACTIVE]));

        assert_eq!(
            Ok((45.0, 22.0)),
            hts221.read_humidity_temperature(&mut board)
        );
    }

    #[test]
    fn test_wrong_chip_id() {
        let mut board = board_with_hts221();
        board.add_register_device(HTS221_I2CADDR_DEFAULT)[REG_WHO_AM_I as usize] = 0xB3;
        assert_eq!(
            Err(SensorError::UnexpectedChipId {
                expected: HTS221_CHIP_ID,
                found: 0xB3
            }),
            Hts221::new().setup(&mut board)
        );
    }
}
