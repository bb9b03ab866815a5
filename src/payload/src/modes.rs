use serde::{Deserialize, Serialize};

/// Compact and verbose output never mix within one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Compact,
    Verbose,
}

pub fn mode_text(mode: &OutputMode) -> &'static str {
    match mode {
        OutputMode::Compact => "compact",
        OutputMode::Verbose => "verbose",
    }
}
