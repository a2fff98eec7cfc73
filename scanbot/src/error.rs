use std::time::Duration;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("scanbot: Illegal state : {}", message)]
    IllegalState { message: String },
    #[error("scanbot: Invalid configuration: {}={}", name, value)]
    InvalidConfiguration { name: String, value: String },
    #[error(
        "scanbot: Invalid obstacle: center=({}, {}), radius={}",
        x,
        y,
        radius
    )]
    InvalidObstacle { x: f64, y: f64, radius: f64 },
    #[error("scanbot: Position ({}, {}) is out of bounds", x, y)]
    OutOfBounds { x: f64, y: f64 },
    #[error("scanbot: Position ({}, {}) is occupied by an obstacle", x, y)]
    PositionOccupied { x: f64, y: f64 },
    #[error(
        "scanbot: Scan callback failed (scan #{}, timestamp={:.3}): {}",
        scan_index,
        timestamp,
        message
    )]
    CallbackFailure {
        scan_index: u64,
        timestamp: f64,
        message: String,
    },
    #[error("scanbot: Scan thread did not stop within {:?}", timeout)]
    ShutdownTimeout { timeout: Duration },
    #[error("scanbot: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid_configuration(name: &str, value: impl ToString) -> Self {
        Self::InvalidConfiguration {
            name: name.to_owned(),
            value: value.to_string(),
        }
    }
}
