pub mod types;

pub mod bmp390;
pub mod hts221;
pub mod sgp40;

pub use bmp390::Bmp390;
pub use hts221::Hts221;
pub use sgp40::Sgp40;
