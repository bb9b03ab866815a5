use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use payload_board::PayloadBoard;

use crate::fusion::FusedSample;
use crate::sensor_bank::SensorPresence;

/// Written in place of any field whose value is absent in compact mode.
pub const ABSENT_SENTINEL: &str = "N/A";
pub const NOT_INITIALIZED: &str = "sensor not initialized";
pub const READ_FAILED: &str = "read failed";
pub const SEPARATOR_WIDTH: usize = 45;

const LABEL_WIDTH: usize = 23;

fn decimal_or_sentinel(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => ABSENT_SENTINEL.to_string(),
    }
}

/// `temperature_f,pressure_hpa,humidity_pct,air_quality_raw`
pub fn render_compact(sample: &FusedSample) -> String {
    let air_quality = match sample.air_quality_raw {
        Some(raw) => format!("{}", raw),
        None => ABSENT_SENTINEL.to_string(),
    };
    format!(
        "{},{},{},{}",
        decimal_or_sentinel(sample.temperature_f),
        decimal_or_sentinel(sample.pressure_hpa),
        decimal_or_sentinel(sample.humidity_pct),
        air_quality
    )
}

fn verbose_line(label: &str, present: bool, value: Option<String>) -> String {
    let value = match (present, value) {
        (false, _) => NOT_INITIALIZED.to_string(),
        (true, None) => READ_FAILED.to_string(),
        (true, Some(value)) => value,
    };
    format!("{:<width$} = {}", label, value, width = LABEL_WIDTH)
}

pub fn render_verbose(sample: &FusedSample, presence: SensorPresence) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);
    lines.push(verbose_line(
        "Temperature",
        presence.barometer && presence.hygrometer,
        sample.temperature_f.map(|value| format!("{:.2} Fahrenheit", value)),
    ));
    lines.push(verbose_line(
        "Pressure",
        presence.barometer,
        sample.pressure_hpa.map(|value| format!("{:.2} hPa", value)),
    ));
    lines.push(verbose_line(
        "Air Quality Index (RAW)",
        presence.air_quality,
        sample.air_quality_raw.map(|raw| format!("{}", raw)),
    ));
    lines.push(verbose_line(
        "Humidity",
        presence.hygrometer,
        sample.humidity_pct.map(|value| format!("{:.2}%", value)),
    ));
    lines.push("-".repeat(SEPARATOR_WIDTH));
    lines
}

pub fn send_compact(board: &mut impl PayloadBoard, sample: &FusedSample) {
    board.serial_send(render_compact(sample).as_str());
    board.serial_send("\n");
}

pub fn send_verbose(board: &mut impl PayloadBoard, sample: &FusedSample, presence: SensorPresence) {
    for line in render_verbose(sample, presence) {
        board.serial_send(line.as_str());
        board.serial_send("\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PRESENT: SensorPresence = SensorPresence {
        barometer: true,
        air_quality: true,
        hygrometer: true,
    };

    fn full_sample() -> FusedSample {
        FusedSample {
            temperature_f: Some(72.14),
            pressure_hpa: Some(1013.25),
            humidity_pct: Some(45.3),
            air_quality_raw: Some(210),
        }
    }

    #[test]
    fn test_compact_line() {
        assert_eq!("72.14,1013.25,45.30,210", render_compact(&full_sample()));
    }

    #[test]
    fn test_compact_rounds_to_two_decimals() {
        let sample = FusedSample {
            temperature_f: Some(69.8),
            pressure_hpa: Some(1013.256),
            humidity_pct: Some(45.0),
            air_quality_raw: Some(0),
        };
        assert_eq!("69.80,1013.26,45.00,0", render_compact(&sample));
    }

    #[test]
    fn test_compact_always_has_four_fields() {
        let samples = [
            full_sample(),
            FusedSample::default(),
            FusedSample {
                humidity_pct: Some(45.0),
                ..FusedSample::default()
            },
            FusedSample {
                temperature_f: Some(f64::NAN),
                air_quality_raw: Some(u16::MAX),
                ..FusedSample::default()
            },
        ];
        for sample in samples.iter() {
            assert_eq!(3, render_compact(sample).matches(',').count());
        }
    }

    #[test]
    fn test_compact_sentinels() {
        let sample = FusedSample {
            humidity_pct: Some(45.0),
            ..FusedSample::default()
        };
        assert_eq!("N/A,N/A,45.00,N/A", render_compact(&sample));
    }

    #[test]
    fn test_verbose_report() {
        assert_eq!(
            vec![
                "Temperature             = 72.14 Fahrenheit",
                "Pressure                = 1013.25 hPa",
                "Air Quality Index (RAW) = 210",
                "Humidity                = 45.30%",
                "---------------------------------------------",
            ],
            render_verbose(&full_sample(), ALL_PRESENT)
        );
    }

    #[test]
    fn test_verbose_not_initialized() {
        let presence = SensorPresence {
            barometer: false,
            air_quality: false,
            hygrometer: true,
        };
        let sample = FusedSample {
            humidity_pct: Some(45.0),
            ..FusedSample::default()
        };
        let lines = render_verbose(&sample, presence);
        assert_eq!("Temperature             = sensor not initialized", lines[0]);
        assert_eq!("Pressure                = sensor not initialized", lines[1]);
        assert_eq!("Air Quality Index (RAW) = sensor not initialized", lines[2]);
        assert_eq!("Humidity                = 45.00%", lines[3]);
    }

    #[test]
    fn test_verbose_read_failed() {
        let sample = FusedSample {
            pressure_hpa: None,
            temperature_f: None,
            ..full_sample()
        };
        let lines = render_verbose(&sample, ALL_PRESENT);
        assert_eq!("Temperature             = read failed", lines[0]);
        assert_eq!("Pressure                = read failed", lines[1]);
        assert_eq!(SEPARATOR_WIDTH, lines[4].len());
    }
}
