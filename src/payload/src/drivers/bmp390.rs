use payload_board::SensorDriverServices;
use rtt_target::rprintln;

use super::types::*;

pub const BMP390_I2CADDR_DEFAULT: u8 = 0x77;

const BMP390_CHIP_ID: u8 = 0x60;
const BMP388_CHIP_ID: u8 = 0x50; // register compatible

const REG_CHIP_ID: u8 = 0x00;
const REG_STATUS: u8 = 0x03;
const REG_DATA: u8 = 0x04; // press xlsb .. temp msb
const REG_PWR_CTRL: u8 = 0x1B;
const REG_OSR: u8 = 0x1C;
const REG_CONFIG: u8 = 0x1F;
const REG_CALIBRATION: u8 = 0x31;
const REG_CMD: u8 = 0x7E;

const CMD_SOFTRESET: u8 = 0xB6;
const PWR_CTRL_FORCED: u8 = 0x13; // press_en | temp_en | forced mode
const OSR_PRESSURE_X8_TEMPERATURE_X1: u8 = 0x03;
const STATUS_DATA_READY: u8 = 0x60; // drdy_press | drdy_temp

const CALIBRATION_SIZE: usize = 21;
const DATA_READY_POLL_MS: u32 = 5;
const DATA_READY_MAX_POLLS: usize = 20;

// 2^exponent without std float intrinsics
fn pow2(exponent: i32) -> f64 {
    f64::from_bits(((exponent + 1023) as u64) << 52)
}

/// Trimming coefficients, already scaled to floating point per the datasheet.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bmp390Calibration {
    par_t1: f64,
    par_t2: f64,
    par_t3: f64,
    par_p1: f64,
    par_p2: f64,
    par_p3: f64,
    par_p4: f64,
    par_p5: f64,
    par_p6: f64,
    par_p7: f64,
    par_p8: f64,
    par_p9: f64,
    par_p10: f64,
    par_p11: f64,
}

impl Bmp390Calibration {
    pub fn new_from_bytes(bytes: &[u8; CALIBRATION_SIZE]) -> Result<Self, SensorError> {
        if bytes.iter().all(|&b| b == 0x00) || bytes.iter().all(|&b| b == 0xFF) {
            return Err(SensorError::Calibration);
        }

        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]) as f64;
        let i16_at = |i: usize| i16::from_le_bytes([bytes[i], bytes[i + 1]]) as f64;
        let i8_at = |i: usize| bytes[i] as i8 as f64;

        Ok(Self {
            par_t1: u16_at(0) * pow2(8),
            par_t2: u16_at(2) / pow2(30),
            par_t3: i8_at(4) / pow2(48),
            par_p1: (i16_at(5) - pow2(14)) / pow2(20),
            par_p2: (i16_at(7) - pow2(14)) / pow2(29),
            par_p3: i8_at(9) / pow2(32),
            par_p4: i8_at(10) / pow2(37),
            par_p5: u16_at(11) * pow2(3),
            par_p6: u16_at(13) / pow2(6),
            par_p7: i8_at(15) / pow2(8),
            par_p8: i8_at(16) / pow2(15),
            par_p9: i16_at(17) / pow2(48),
            par_p10: i8_at(19) / pow2(48),
            par_p11: i8_at(20) / pow2(65),
        })
    }

    /// Linearized temperature in °C.
    pub fn compensate_temperature(&self, uncompensated: u32) -> f64 {
        let partial_1 = uncompensated as f64 - self.par_t1;
        let partial_2 = partial_1 * self.par_t2;
        partial_2 + partial_1 * partial_1 * self.par_t3
    }

    /// Pressure in Pa, given the linearized temperature.
    pub fn compensate_pressure(&self, uncompensated: u32, t_lin: f64) -> f64 {
        let t_lin_2 = t_lin * t_lin;
        let t_lin_3 = t_lin_2 * t_lin;
        let raw = uncompensated as f64;

        let offset = self.par_p5 + self.par_p6 * t_lin + self.par_p7 * t_lin_2 + self.par_p8 * t_lin_3;
        let sensitivity =
            raw * (self.par_p1 + self.par_p2 * t_lin + self.par_p3 * t_lin_2 + self.par_p4 * t_lin_3);
        let quadratic = raw * raw * (self.par_p9 + self.par_p10 * t_lin);
        let cubic = raw * raw * raw * self.par_p11;

        offset + sensitivity + quadratic + cubic
    }
}

pub struct Bmp390 {
    address: u8,
    calibration: Bmp390Calibration,
}

impl Bmp390 {
    pub fn new() -> Self {
        Bmp390 {
            address: BMP390_I2CADDR_DEFAULT,
            calibration: Bmp390Calibration::default(),
        }
    }

    fn wait_for_data(&self, board: &mut dyn SensorDriverServices) -> Result<(), SensorError> {
        for _ in 0..DATA_READY_MAX_POLLS {
            let status = read_register(board, self.address, REG_STATUS)?;
            if status & STATUS_DATA_READY == STATUS_DATA_READY {
                return Ok(());
            }
            board.delay_ms(DATA_READY_POLL_MS);
        }
        Err(SensorError::Timeout)
    }
}

impl SensorDriver for Bmp390 {
    fn get_name(&self) -> &'static str {
        "BMP390"
    }

    fn setup(&mut self, board: &mut dyn SensorDriverServices) -> Result<(), SensorError> {
        let chip_id = read_register(board, self.address, REG_CHIP_ID)?;
        if chip_id != BMP390_CHIP_ID && chip_id != BMP388_CHIP_ID {
            return Err(SensorError::UnexpectedChipId {
                expected: BMP390_CHIP_ID,
                found: chip_id,
            });
        }

        write_register(board, self.address, REG_CMD, CMD_SOFTRESET)?;
        board.delay_ms(10);

        let mut bytes = [0_u8; CALIBRATION_SIZE];
        read_registers(board, self.address, REG_CALIBRATION, &mut bytes)?;
        self.calibration = Bmp390Calibration::new_from_bytes(&bytes)?;

        write_register(board, self.address, REG_OSR, OSR_PRESSURE_X8_TEMPERATURE_X1)?;
        write_register(board, self.address, REG_CONFIG, 0)?; // iir filter off
        rprintln!("bmp390 chip id {:X}", chip_id);
        Ok(())
    }
}

impl BarometricSensor for Bmp390 {
    fn read_temperature_pressure(
        &mut self,
        board: &mut dyn SensorDriverServices,
    ) -> Result<(f64, f64), SensorError> {
        write_register(board, self.address, REG_PWR_CTRL, PWR_CTRL_FORCED)?;
        self.wait_for_data(board)?;

        let mut data = [0_u8; 6];
        read_registers(board, self.address, REG_DATA, &mut data)?;
        let uncompensated_pressure =
            (data[2] as u32) << 16 | (data[1] as u32) << 8 | data[0] as u32;
        let uncompensated_temperature =
            (data[5] as u32) << 16 | (data[4] as u32) << 8 | data[3] as u32;

        let temperature = self.calibration.compensate_temperature(uncompensated_temperature);
        let pressure = self
            .calibration
            .compensate_pressure(uncompensated_pressure, temperature);
        Ok((temperature, pressure / 100.0))
    }
}
