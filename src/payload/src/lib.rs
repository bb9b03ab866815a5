#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod drivers;
pub mod fusion;
pub mod modes;
pub mod protocol;
pub mod sensor_bank;
pub mod settings;

#[cfg(test)]
mod test_support;

use payload_board::PayloadBoard;
use rtt_target::rprintln;

use crate::fusion::FusedSample;
use crate::modes::{mode_text, OutputMode};
use crate::protocol::{status, telemetry};
use crate::sensor_bank::SensorBank;
use crate::settings::LoopSettings;

/// The payload's acquisition loop. Owns the sensor bank; borrows the board per call.
pub struct PayloadTelemetry {
    settings: LoopSettings,
    sensor_bank: SensorBank,
}

impl PayloadTelemetry {
    /// Opens the flight sensors, reporting each one's status on the serial sink.
    pub fn setup(board: &mut impl PayloadBoard, settings: LoopSettings) -> Self {
        let sensor_bank = SensorBank::open(board);
        PayloadTelemetry::new(settings, sensor_bank)
    }

    pub fn new(settings: LoopSettings, sensor_bank: SensorBank) -> Self {
        rprintln!(
            "{} mode, settings {}",
            mode_text(&settings.mode),
            settings.to_json()
        );
        PayloadTelemetry {
            settings,
            sensor_bank,
        }
    }

    pub fn send_banner(&mut self, board: &mut impl PayloadBoard) {
        status::send_board_id(board);
    }

    pub fn startup(&mut self, board: &mut impl PayloadBoard) {
        status::send_countdown(board, self.settings.countdown_seconds);
    }

    /// Reads, fuses, and emits one sample, then waits out the sample interval.
    pub fn run_loop_iteration(&mut self, board: &mut impl PayloadBoard) -> FusedSample {
        let raw = self.sensor_bank.read_all(board.get_sensor_driver_services());
        let sample = FusedSample::from_raw(&raw);

        match self.settings.mode {
            OutputMode::Compact => telemetry::send_compact(board, &sample),
            OutputMode::Verbose => {
                telemetry::send_verbose(board, &sample, self.sensor_bank.presence())
            }
        }

        if self.settings.sample_interval_ms > 0 {
            board.delay_ms(self.settings.sample_interval_ms);
        }
        sample
    }

    /// Runs until power is removed.
    pub fn run(&mut self, board: &mut impl PayloadBoard) -> ! {
        self.send_banner(board);
        self.startup(board);
        loop {
            self.run_loop_iteration(board);
        }
    }
}
