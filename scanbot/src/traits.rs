mod laser_scan;
mod range_sensor;

pub use laser_scan::*;
pub use range_sensor::*;
