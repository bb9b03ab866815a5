use crate::sensor_bank::RawSample;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FusedSample {
    pub temperature_f: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub air_quality_raw: Option<u16>,
}

impl FusedSample {
    pub fn from_raw(raw: &RawSample) -> Self {
        FusedSample {
            temperature_f: fuse(raw.temperature_primary_c, raw.temperature_secondary_c),
            pressure_hpa: raw.pressure_hpa,
            humidity_pct: raw.humidity_pct,
            air_quality_raw: raw.air_quality_raw,
        }
    }
}

/// Averages the two thermometers in Celsius, then converts to Fahrenheit.
/// Both readings are required; a single thermometer never stands in for the pair.
pub fn fuse(temp_primary_c: Option<f64>, temp_secondary_c: Option<f64>) -> Option<f64> {
    match (temp_primary_c, temp_secondary_c) {
        (Some(primary), Some(secondary)) => {
            let mean_c = (primary + secondary) / 2.0;
            Some(mean_c * 9.0 / 5.0 + 32.0)
        }
        _ => None,
    }
}
