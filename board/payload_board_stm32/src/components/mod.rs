pub mod i2c;
pub use i2c::*;

pub mod serial;
pub use serial::*;

pub mod uid;
pub use uid::*;
