use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the UNIX epoch, the timestamp unit of every reading.
pub fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
