use auto_impl::auto_impl;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Single distance measurement of a short-range sensor such as a sonar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeReading {
    /// Distance in meters.
    pub distance: f64,
    /// Seconds since the UNIX epoch.
    pub timestamp: f64,
}

#[auto_impl(Box, Arc)]
pub trait RangeSensor: Send + Sync {
    fn current_distance(&self) -> Result<RangeReading, Error>;
}
