use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modes::OutputMode;

pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 5;
/// The throttled cadence; zero runs the loop back to back.
pub const THROTTLED_SAMPLE_INTERVAL_MS: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Invalid(serde_json::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopSettings {
    pub mode: OutputMode,
    pub sample_interval_ms: u32,
    pub countdown_seconds: u32,
}

impl Default for LoopSettings {
    fn default() -> Self {
        LoopSettings {
            mode: OutputMode::Compact,
            sample_interval_ms: 0,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

impl LoopSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The human readable configuration: full report every 100 ms.
    pub fn verbose() -> Self {
        LoopSettings {
            mode: OutputMode::Verbose,
            sample_interval_ms: THROTTLED_SAMPLE_INTERVAL_MS,
            ..Self::default()
        }
    }

    /// Missing keys keep their defaults.
    pub fn new_from_values(value: Value) -> Result<LoopSettings, SettingsError> {
        serde_json::from_value(value).map_err(SettingsError::Invalid)
    }

    pub fn to_json(&self) -> Value {
        // every field is a plain number or unit enum
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
