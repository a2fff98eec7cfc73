//! Wrappers that record every sensor call as a `tracing` event at the TRACE level.
//!
//! ```
//! use scanbot::{DummyRangeSensor, RangeSensor};
//! use scanbot_tracing::Tracing;
//!
//! let sonar = Tracing::new(DummyRangeSensor::new(1.5));
//! assert_eq!(sonar.current_distance().unwrap().distance, 1.5);
//! ```

#![warn(rust_2018_idioms)]
// buggy: https://github.com/rust-lang/rust-clippy/issues?q=is%3Aissue+derive_partial_eq_without_eq
#![allow(clippy::derive_partial_eq_without_eq)]

use tracing::trace;

#[derive(Debug)]
pub struct Tracing<T>(T);

impl<T> Tracing<T> {
    pub fn new(v: T) -> Self {
        Self(v)
    }

    pub fn get_ref(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Tracing<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: scanbot::LaserScan2D> scanbot::LaserScan2D for Tracing<T> {
    fn current_scan(&self) -> Result<scanbot::Scan, scanbot::Error> {
        let scan = self.0.current_scan()?;
        trace!(
            method = "scanbot::LaserScan2D::current_scan",
            num_readings = scan.len(),
            detected = scan.detected_count(),
            timestamp = scan.timestamp(),
        );
        Ok(scan)
    }
}

impl<T: scanbot::RangeSensor> scanbot::RangeSensor for Tracing<T> {
    fn current_distance(&self) -> Result<scanbot::RangeReading, scanbot::Error> {
        let reading = self.0.current_distance()?;
        trace!(
            method = "scanbot::RangeSensor::current_distance",
            distance = reading.distance,
            timestamp = reading.timestamp,
        );
        Ok(reading)
    }
}
