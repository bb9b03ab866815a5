use payload_board::SensorDriverServices;
use rtt_target::rprintln;

use super::types::*;

pub const SGP40_I2CADDR_DEFAULT: u8 = 0x59;

const CMD_SERIAL_NUMBER: [u8; 2] = [0x36, 0x82];
const CMD_SELF_TEST: [u8; 2] = [0x28, 0x0E];
const CMD_MEASURE_RAW: [u8; 2] = [0x26, 0x0F];

const SELF_TEST_PASSED: u16 = 0xD400;

// compensation words for 50 %rH and 25 °C, used when no compensation is supplied
const DEFAULT_HUMIDITY_TICKS: u16 = 0x8000;
const DEFAULT_TEMPERATURE_TICKS: u16 = 0x6666;

const SERIAL_NUMBER_DELAY_MS: u32 = 1;
const SELF_TEST_DELAY_MS: u32 = 320;
const MEASURE_RAW_DELAY_MS: u32 = 30;

const CRC8_POLYNOMIAL: u8 = 0x31;
const CRC8_INIT: u8 = 0xFF;

/// Sensirion CRC-8 over one data word.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = CRC8_INIT;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ CRC8_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

fn measure_raw_command(humidity_ticks: u16, temperature_ticks: u16) -> [u8; 8] {
    let humidity = humidity_ticks.to_be_bytes();
    let temperature = temperature_ticks.to_be_bytes();
    [
        CMD_MEASURE_RAW[0],
        CMD_MEASURE_RAW[1],
        humidity[0],
        humidity[1],
        crc8(&humidity),
        temperature[0],
        temperature[1],
        crc8(&temperature),
    ]
}

/// Splits a response into its data words, checking each word's crc.
fn decode_words<const N: usize>(response: &[u8]) -> Result<[u16; N], SensorError> {
    let mut words = [0_u16; N];
    for (word, chunk) in words.iter_mut().zip(response.chunks_exact(3)) {
        if crc8(&chunk[0..2]) != chunk[2] {
            return Err(SensorError::Crc);
        }
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    Ok(words)
}

pub struct Sgp40 {
    address: u8,
    serial_number: [u16; 3],
}

impl Sgp40 {
    pub fn new() -> Self {
        Sgp40 {
            address: SGP40_I2CADDR_DEFAULT,
            serial_number: [0; 3],
        }
    }

    pub fn get_serial_number(&self) -> [u16; 3] {
        self.serial_number
    }

    fn command<const N: usize>(
        &self,
        board: &mut dyn SensorDriverServices,
        command: &[u8],
        delay_ms: u32,
        response: &mut [u8; N],
    ) -> Result<(), SensorError> {
        board.ic2_write(self.address, command)?;
        board.delay_ms(delay_ms);
        board.ic2_read(self.address, response)?;
        Ok(())
    }
}

impl SensorDriver for Sgp40 {
    fn get_name(&self) -> &'static str {
        "SGP40"
    }

    fn setup(&mut self, board: &mut dyn SensorDriverServices) -> Result<(), SensorError> {
        let mut response = [0_u8; 9];
        self.command(board, &CMD_SERIAL_NUMBER, SERIAL_NUMBER_DELAY_MS, &mut response)?;
        self.serial_number = decode_words::<3>(&response)?;
        rprintln!("sgp40 serial {:X?}", self.serial_number);

        let mut response = [0_u8; 3];
        self.command(board, &CMD_SELF_TEST, SELF_TEST_DELAY_MS, &mut response)?;
        let [result] = decode_words::<1>(&response)?;
        if result != SELF_TEST_PASSED {
            return Err(SensorError::SelfTest(result));
        }
        Ok(())
    }
}

impl AirQualitySensor for Sgp40 {
    fn read_raw(&mut self, board: &mut dyn SensorDriverServices) -> Result<u16, SensorError> {
        let command = measure_raw_command(DEFAULT_HUMIDITY_TICKS, DEFAULT_TEMPERATURE_TICKS);
        let mut response = [0_u8; 3];
        self.command(board, &command, MEASURE_RAW_DELAY_MS, &mut response)?;
        let [raw] = decode_words::<1>(&response)?;
        Ok(raw)
    }
}
