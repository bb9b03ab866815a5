pub mod status;
pub mod telemetry;
