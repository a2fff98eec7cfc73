use std::ops::Index;

use auto_impl::auto_impl;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One sample of a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Beam angle in degrees, counter-clockwise from +x.
    pub angle: f64,
    /// Distance in meters to the first hit, `0.0` if nothing was seen within range.
    pub distance: f64,
    /// Return strength, `0` if nothing was seen.
    pub intensity: u8,
    /// Seconds since the UNIX epoch. Shared by every reading of a sweep.
    pub timestamp: f64,
}

impl Reading {
    pub fn is_detected(&self) -> bool {
        self.distance > 0.0
    }
}

/// A complete sweep: one reading per configured angle, in increasing angle order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    pub readings: Vec<Reading>,
}

impl Scan {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// Timestamp of the sweep, `None` for an empty scan.
    pub fn timestamp(&self) -> Option<f64> {
        self.readings.first().map(|r| r.timestamp)
    }

    /// Number of readings that saw something within range.
    pub fn detected_count(&self) -> usize {
        self.readings.iter().filter(|r| r.is_detected()).count()
    }
}

impl Index<usize> for Scan {
    type Output = Reading;

    fn index(&self, index: usize) -> &Self::Output {
        &self.readings[index]
    }
}

impl<'a> IntoIterator for &'a Scan {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

#[auto_impl(Box, Arc)]
pub trait LaserScan2D: Send + Sync {
    fn current_scan(&self) -> Result<Scan, Error>;
}
