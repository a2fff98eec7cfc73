use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use parking_lot::{Mutex, RwLock};
use scanbot::{unix_timestamp, EnvironmentContext, Error, LaserScan2D, Reading, Scan};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    continuous::{ContinuousScan, ScanCallback, STOP_TIMEOUT},
    range::simulate_reading,
};

fn default_scan_frequency() -> f64 {
    1.0
}

fn default_resolution() -> usize {
    360
}

fn default_max_range() -> f64 {
    5.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotatingLidarConfig {
    /// Sweeps per second while scanning continuously.
    #[serde(default = "default_scan_frequency")]
    pub scan_frequency: f64,
    /// Readings per revolution.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Hits farther than this (in meters) are reported as "nothing detected".
    #[serde(default = "default_max_range")]
    pub max_range: f64,
}

impl Default for RotatingLidarConfig {
    fn default() -> Self {
        Self {
            scan_frequency: default_scan_frequency(),
            resolution: default_resolution(),
            max_range: default_max_range(),
        }
    }
}

impl RotatingLidarConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.scan_frequency.is_finite() && self.scan_frequency > 0.0)
            || Duration::try_from_secs_f64(1.0 / self.scan_frequency).is_err()
        {
            return Err(Error::invalid_configuration(
                "scan_frequency",
                self.scan_frequency,
            ));
        }
        if self.resolution == 0 {
            return Err(Error::invalid_configuration("resolution", self.resolution));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(Error::invalid_configuration("max_range", self.max_range));
        }
        Ok(())
    }

    /// Saturates at `Duration::MAX` for frequencies rejected by `validate`.
    pub fn scan_period(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.scan_frequency).unwrap_or(Duration::MAX)
    }

    pub fn angle_step(&self) -> f64 {
        360.0 / self.resolution as f64
    }
}

/// State shared between the lidar handle and its background scan thread.
#[derive(Debug)]
pub(crate) struct LidarCore {
    config: RwLock<RotatingLidarConfig>,
    is_scanning: AtomicBool,
    context: RwLock<Option<Arc<EnvironmentContext>>>,
    pub(crate) latest_scan: Mutex<Option<Arc<Scan>>>,
    pub(crate) scan_count: AtomicU64,
}

impl LidarCore {
    pub(crate) fn scan_period(&self) -> Duration {
        self.config.read().scan_period()
    }

    pub(crate) fn get_scan(&self) -> Result<Scan, Error> {
        if !self.is_scanning.load(Ordering::Acquire) {
            return Err(Error::IllegalState {
                message: "LIDAR is not scanning. Call start_scanning() first.".to_owned(),
            });
        }
        let config = *self.config.read();
        // One snapshot per sweep, so a concurrent update never splits a scan.
        let context = self.context.read().clone();
        let timestamp = unix_timestamp();
        let angle_step = config.angle_step();

        let readings = (0..config.resolution)
            .map(|i| {
                let angle = i as f64 * angle_step;
                let (distance, intensity) =
                    simulate_reading(angle, context.as_deref(), config.max_range);
                Reading {
                    angle,
                    distance,
                    intensity,
                    timestamp,
                }
            })
            .collect();
        Ok(Scan::new(readings))
    }
}

/// Simulated rotating LIDAR.
///
/// A single sweep is taken synchronously with [`RotatingLidar::get_scan`]. With
/// [`RotatingLidar::start_continuous_scan`] a background thread sweeps once per
/// scan period, keeps the newest result for [`RotatingLidar::get_latest_scan`] and
/// hands each sweep to an optional callback.
#[derive(Debug)]
pub struct RotatingLidar {
    core: Arc<LidarCore>,
    continuous: Mutex<Option<ContinuousScan>>,
}

impl RotatingLidar {
    pub fn new(config: RotatingLidarConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            core: Arc::new(LidarCore {
                config: RwLock::new(config),
                is_scanning: AtomicBool::new(false),
                context: RwLock::new(None),
                latest_scan: Mutex::new(None),
                scan_count: AtomicU64::new(0),
            }),
            continuous: Mutex::new(None),
        })
    }

    pub fn config(&self) -> RotatingLidarConfig {
        *self.core.config.read()
    }

    pub fn scan_period(&self) -> Duration {
        self.core.scan_period()
    }

    /// Changes the sweep rate. A running continuous scan picks it up from its next cycle.
    pub fn set_scan_frequency(&self, scan_frequency: f64) -> Result<(), Error> {
        let mut config = self.core.config.write();
        let updated = RotatingLidarConfig {
            scan_frequency,
            ..*config
        };
        updated.validate()?;
        *config = updated;
        Ok(())
    }

    /// Replaces the world the lidar casts rays against. `None` makes every reading empty.
    ///
    /// Sweeps already in progress keep using the previous snapshot.
    pub fn set_environment_context(&self, context: Option<EnvironmentContext>) -> Result<(), Error> {
        if let Some(context) = &context {
            context.validate()?;
        }
        *self.core.context.write() = context.map(Arc::new);
        Ok(())
    }

    pub fn environment_context(&self) -> Option<Arc<EnvironmentContext>> {
        self.core.context.read().clone()
    }

    pub fn start_scanning(&self) {
        self.core.is_scanning.store(true, Ordering::Release);
        info!(
            "LIDAR: Started scanning at {}Hz",
            self.core.config.read().scan_frequency
        );
    }

    pub fn stop_scanning(&self) {
        self.core.is_scanning.store(false, Ordering::Release);
        info!("LIDAR: Stopped scanning");
    }

    pub fn is_scanning(&self) -> bool {
        self.core.is_scanning.load(Ordering::Acquire)
    }

    /// Takes one full sweep. Fails with [`Error::IllegalState`] unless scanning is enabled.
    pub fn get_scan(&self) -> Result<Scan, Error> {
        self.core.get_scan()
    }

    /// Starts sweeping in the background. Does nothing if a continuous scan is
    /// already running.
    pub fn start_continuous_scan(&self, callback: Option<ScanCallback>) -> Result<(), Error> {
        let mut continuous = self.continuous.lock();
        if continuous.as_ref().is_some_and(ContinuousScan::is_running) {
            warn!("LIDAR: Continuous scan already running");
            return Ok(());
        }
        // The previous thread ended on its own; reap it before starting over.
        if let Some(finished) = continuous.take() {
            finished.join();
        }

        self.core.scan_count.store(0, Ordering::Relaxed);
        self.core.is_scanning.store(true, Ordering::Release);
        *continuous = Some(ContinuousScan::spawn(self.core.clone(), callback)?);
        info!(
            "LIDAR: Started continuous scanning at {}Hz",
            self.core.config.read().scan_frequency
        );
        Ok(())
    }

    /// Same as [`RotatingLidar::start_continuous_scan`] with a callback.
    pub fn start_continuous_scan_with<F>(&self, callback: F) -> Result<(), Error>
    where
        F: FnMut(&Scan) -> Result<(), Error> + Send + 'static,
    {
        self.start_continuous_scan(Some(Box::new(callback)))
    }

    /// Stops the background sweeps, waiting at most [`STOP_TIMEOUT`] for the thread.
    ///
    /// If the thread does not acknowledge in time a warning is logged and the call
    /// returns anyway. The thread still exits at its next check.
    pub fn stop_continuous_scan(&self) {
        let Some(continuous) = self.continuous.lock().take() else {
            return;
        };
        if !continuous.is_running() {
            continuous.join();
            return;
        }
        match continuous.stop(STOP_TIMEOUT) {
            Ok(()) => info!(
                "LIDAR: Stopped continuous scanning (completed {} scans)",
                self.scan_count()
            ),
            Err(e) => warn!("{e}"),
        }
    }

    pub fn is_continuous_scanning(&self) -> bool {
        self.continuous
            .lock()
            .as_ref()
            .is_some_and(ContinuousScan::is_running)
    }

    /// Newest sweep of the continuous scan, if any has completed.
    pub fn get_latest_scan(&self) -> Option<Arc<Scan>> {
        self.core.latest_scan.lock().clone()
    }

    /// Sweeps completed since the last `start_continuous_scan`.
    pub fn scan_count(&self) -> u64 {
        self.core.scan_count.load(Ordering::Relaxed)
    }
}

impl Drop for RotatingLidar {
    fn drop(&mut self) {
        debug!("LIDAR: dropping");
        self.stop_continuous_scan();
    }
}

impl LaserScan2D for RotatingLidar {
    fn current_scan(&self) -> Result<Scan, Error> {
        self.get_scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RotatingLidarConfig::default();
        assert_eq!(config.resolution, 360);
        assert_eq!(config.max_range, 5.0);
        assert_eq!(config.scan_period(), Duration::from_secs(1));
        assert_eq!(config.angle_step(), 1.0);
    }

    #[test]
    fn test_config_from_toml() {
        let config: RotatingLidarConfig = toml::from_str("scan_frequency = 4.0").unwrap();
        assert_eq!(config.scan_period(), Duration::from_millis(250));
        assert_eq!(config.resolution, 360);
        assert!(toml::from_str::<RotatingLidarConfig>("frequency = 4.0").is_err());
    }

    #[test]
    fn test_invalid_config() {
        for config in [
            RotatingLidarConfig {
                scan_frequency: 0.0,
                ..Default::default()
            },
            RotatingLidarConfig {
                scan_frequency: f64::NAN,
                ..Default::default()
            },
            RotatingLidarConfig {
                scan_frequency: 1e-20,
                ..Default::default()
            },
            RotatingLidarConfig {
                resolution: 0,
                ..Default::default()
            },
            RotatingLidarConfig {
                max_range: -5.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                RotatingLidar::new(config),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_set_scan_frequency() {
        let lidar = RotatingLidar::new(RotatingLidarConfig::default()).unwrap();
        lidar.set_scan_frequency(2.0).unwrap();
        assert_eq!(lidar.scan_period(), Duration::from_millis(500));
        assert!(lidar.set_scan_frequency(-1.0).is_err());
        assert_eq!(lidar.config().scan_frequency, 2.0);
        assert!(matches!(
            lidar.set_scan_frequency(1e-20),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert_eq!(lidar.scan_period(), Duration::from_millis(500));
    }

    #[test]
    fn test_scan_period_unrepresentable() {
        let config = RotatingLidarConfig {
            scan_frequency: 1e-20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.scan_period(), Duration::MAX);
    }
}
