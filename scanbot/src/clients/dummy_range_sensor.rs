use crate::{Error, RangeReading, RangeSensor};

/// Dummy RangeSensor for debug or tests. Always reports a fixed distance.
#[derive(Debug, Clone, Default)]
pub struct DummyRangeSensor {
    pub distance: f64,
}

impl DummyRangeSensor {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }
}

impl RangeSensor for DummyRangeSensor {
    fn current_distance(&self) -> Result<RangeReading, Error> {
        Ok(RangeReading {
            distance: self.distance,
            timestamp: crate::unix_timestamp(),
        })
    }
}
