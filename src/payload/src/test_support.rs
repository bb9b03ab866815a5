// Test doubles standing in for the board and the sensor drivers.

use std::collections::{BTreeMap, VecDeque};
use std::string::String;
use std::vec::Vec;

use payload_board::{
    BusError, NoAcknowledgeSource, PayloadBoard, SensorDriverServices, BOARD_ID_SIZE,
};

use crate::drivers::types::*;

pub struct TestBoard {
    pub serial: String,
    pub delays: Vec<u32>,
    pub board_id: &'static str,
    pub writes: Vec<(u8, Vec<u8>)>,
    register_devices: BTreeMap<u8, [u8; 256]>,
    read_responses: BTreeMap<u8, VecDeque<Vec<u8>>>,
}

impl TestBoard {
    pub fn new() -> Self {
        TestBoard {
            serial: String::new(),
            delays: Vec::new(),
            board_id: "test_board",
            writes: Vec::new(),
            register_devices: BTreeMap::new(),
            read_responses: BTreeMap::new(),
        }
    }

    /// Returns the register file of the device at `address`, creating an empty one if needed.
    pub fn add_register_device(&mut self, address: u8) -> &mut [u8; 256] {
        self.register_devices.entry(address).or_insert([0; 256])
    }

    /// Queues the bytes returned by the next plain read from `address`.
    pub fn queue_read(&mut self, address: u8, bytes: Vec<u8>) {
        self.read_responses.entry(address).or_default().push_back(bytes);
    }

    pub fn was_written(&self, address: u8, message: &[u8]) -> bool {
        self.writes
            .iter()
            .any(|(written_address, written)| *written_address == address && written == message)
    }

    pub fn serial_lines(&self) -> Vec<&str> {
        self.serial.lines().collect()
    }

    fn present(&self, address: u8) -> Result<(), BusError> {
        if self.register_devices.contains_key(&address) || self.read_responses.contains_key(&address) {
            Ok(())
        } else {
            Err(BusError::NoAcknowledge(NoAcknowledgeSource::Address))
        }
    }
}

impl PayloadBoard for TestBoard {
    fn serial_send(&mut self, string: &str) {
        self.serial.push_str(string);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }

    fn get_board_id(&mut self) -> [u8; BOARD_ID_SIZE] {
        util::nul_padded(self.board_id)
    }

    fn get_sensor_driver_services(&mut self) -> &mut dyn SensorDriverServices {
        self
    }
}

impl SensorDriverServices for TestBoard {
    fn ic2_read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.present(addr)?;
        let response = self
            .read_responses
            .get_mut(&addr)
            .and_then(|queue| queue.pop_front())
            .ok_or(BusError::Other)?;
        let length = response.len().min(buffer.len());
        buffer[..length].copy_from_slice(&response[..length]);
        Ok(())
    }

    fn ic2_write(&mut self, addr: u8, message: &[u8]) -> Result<(), BusError> {
        self.present(addr)?;
        self.writes.push((addr, message.to_vec()));
        Ok(())
    }

    fn ic2_write_read(
        &mut self,
        addr: u8,
        message: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), BusError> {
        self.present(addr)?;
        let registers = self.register_devices.get(&addr).ok_or(BusError::Other)?;
        let start = (message[0] & 0x7F) as usize;
        buffer.copy_from_slice(&registers[start..start + buffer.len()]);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}

/// A driver whose handshake either succeeds or fails with a fixed error,
/// and whose reads return a fixed value or error.
pub struct FakeSensor<T: Copy> {
    pub name: &'static str,
    pub setup_result: Result<(), SensorError>,
    pub reading: Result<T, SensorError>,
    pub reads: usize,
}

impl<T: Copy> FakeSensor<T> {
    pub fn working(name: &'static str, reading: T) -> Self {
        FakeSensor {
            name,
            setup_result: Ok(()),
            reading: Ok(reading),
            reads: 0,
        }
    }

    pub fn failing(name: &'static str, error: SensorError) -> Self {
        FakeSensor {
            name,
            setup_result: Err(error),
            reading: Err(error),
            reads: 0,
        }
    }

    pub fn flaky(name: &'static str, error: SensorError) -> Self {
        FakeSensor {
            name,
            setup_result: Ok(()),
            reading: Err(error),
            reads: 0,
        }
    }

    fn read(&mut self) -> Result<T, SensorError> {
        self.reads += 1;
        self.reading
    }
}

impl<T: Copy> SensorDriver for FakeSensor<T> {
    fn get_name(&self) -> &'static str {
        self.name
    }

    fn setup(&mut self, _board: &mut dyn SensorDriverServices) -> Result<(), SensorError> {
        self.setup_result
    }
}

impl BarometricSensor for FakeSensor<(f64, f64)> {
    fn read_temperature_pressure(
        &mut self,
        _board: &mut dyn SensorDriverServices,
    ) -> Result<(f64, f64), SensorError> {
        self.read()
    }
}

impl HygrometerSensor for FakeSensor<(f64, f64)> {
    fn read_humidity_temperature(
        &mut self,
        _board: &mut dyn SensorDriverServices,
    ) -> Result<(f64, f64), SensorError> {
        self.read()
    }
}

impl AirQualitySensor for FakeSensor<u16> {
    fn read_raw(&mut self, _board: &mut dyn SensorDriverServices) -> Result<u16, SensorError> {
        self.read()
    }
}

pub const MISSING: SensorError = SensorError::Bus(BusError::NoAcknowledge(NoAcknowledgeSource::Address));
