use parking_lot::Mutex;

use crate::{Error, LaserScan2D, Scan};

/// Dummy LaserScan2D for debug or tests. Returns whatever scan was last set.
#[derive(Debug, Default)]
pub struct DummyLaserScan2D {
    pub scan: Mutex<Scan>,
}

impl DummyLaserScan2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scan(&self, scan: Scan) {
        *self.scan.lock() = scan;
    }
}

impl LaserScan2D for DummyLaserScan2D {
    fn current_scan(&self) -> Result<Scan, Error> {
        Ok(self.scan.lock().clone())
    }
}
