use alloc::boxed::Box;
use payload_board::{PayloadBoard, SensorDriverServices};
use rtt_target::rprintln;

use crate::drivers::{types::*, Bmp390, Hts221, Sgp40};
use crate::protocol::status;

/// One sensor connection, decided once at startup and never retried.
pub enum SensorHandle<T> {
    Present(T),
    Absent(SensorError),
}

impl<T> SensorHandle<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, SensorHandle::Present(_))
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            SensorHandle::Present(driver) => Some(driver),
            SensorHandle::Absent(_) => None,
        }
    }

    pub fn error(&self) -> Option<SensorError> {
        match self {
            SensorHandle::Present(_) => None,
            SensorHandle::Absent(error) => Some(*error),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RawSample {
    pub temperature_primary_c: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub temperature_secondary_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub air_quality_raw: Option<u16>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SensorPresence {
    pub barometer: bool,
    pub air_quality: bool,
    pub hygrometer: bool,
}

pub struct SensorBank {
    barometer: SensorHandle<Box<dyn BarometricSensor>>,
    air_quality: SensorHandle<Box<dyn AirQualitySensor>>,
    hygrometer: SensorHandle<Box<dyn HygrometerSensor>>,
}

// attempt one handshake; whatever happens, report it and hand back a handle
fn open_handle<T: SensorDriver + ?Sized>(
    board: &mut impl PayloadBoard,
    mut driver: Box<T>,
) -> SensorHandle<Box<T>> {
    let name = driver.get_name();
    match driver.setup(board.get_sensor_driver_services()) {
        Ok(()) => {
            rprintln!("{} ready", name);
            status::send_sensor_initialized(board, name);
            SensorHandle::Present(driver)
        }
        Err(error) => {
            rprintln!("{} setup failed {:?}", name, error);
            status::send_sensor_failed(board, name, &error);
            SensorHandle::Absent(error)
        }
    }
}

// a read error only blanks this sensor's fields for this iteration
fn read_or_absent<T>(name: &str, reading: Result<T, SensorError>) -> Option<T> {
    match reading {
        Ok(value) => Some(value),
        Err(error) => {
            rprintln!("{} read failed {:?}", name, error);
            None
        }
    }
}

impl SensorBank {
    /// Opens the flight sensor set: BMP390, SGP40 and HTS221 on the board's bus.
    pub fn open(board: &mut impl PayloadBoard) -> Self {
        SensorBank::new(
            board,
            Box::new(Bmp390::new()),
            Box::new(Sgp40::new()),
            Box::new(Hts221::new()),
        )
    }

    pub fn new(
        board: &mut impl PayloadBoard,
        barometer: Box<dyn BarometricSensor>,
        air_quality: Box<dyn AirQualitySensor>,
        hygrometer: Box<dyn HygrometerSensor>,
    ) -> Self {
        SensorBank {
            barometer: open_handle(board, barometer),
            air_quality: open_handle(board, air_quality),
            hygrometer: open_handle(board, hygrometer),
        }
    }

    pub fn presence(&self) -> SensorPresence {
        SensorPresence {
            barometer: self.barometer.is_present(),
            air_quality: self.air_quality.is_present(),
            hygrometer: self.hygrometer.is_present(),
        }
    }

    pub fn read_all(&mut self, board: &mut dyn SensorDriverServices) -> RawSample {
        let mut sample = RawSample::default();

        if let Some(barometer) = self.barometer.as_mut() {
            let reading = barometer.read_temperature_pressure(board);
            if let Some((temperature, pressure)) = read_or_absent(barometer.get_name(), reading) {
                sample.temperature_primary_c = Some(temperature);
                sample.pressure_hpa = Some(pressure);
            }
        }

        if let Some(air_quality) = self.air_quality.as_mut() {
            let reading = air_quality.read_raw(board);
            sample.air_quality_raw = read_or_absent(air_quality.get_name(), reading);
        }

        if let Some(hygrometer) = self.hygrometer.as_mut() {
            let reading = hygrometer.read_humidity_temperature(board);
            if let Some((humidity, temperature)) = read_or_absent(hygrometer.get_name(), reading) {
                sample.humidity_pct = Some(humidity);
                sample.temperature_secondary_c = Some(temperature);
            }
        }

        sample
    }
}
