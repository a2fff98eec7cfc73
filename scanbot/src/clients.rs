mod dummy_laser_scan;
mod dummy_range_sensor;

pub use dummy_laser_scan::*;
pub use dummy_range_sensor::*;
