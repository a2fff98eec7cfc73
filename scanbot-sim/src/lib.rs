mod bot;
mod continuous;
mod environment;
pub mod geometry;
mod lidar;
pub mod range;
mod sonar;

pub use bot::*;
pub use continuous::{ScanCallback, STOP_TIMEOUT};
pub use environment::*;
pub use lidar::*;
pub use sonar::*;
