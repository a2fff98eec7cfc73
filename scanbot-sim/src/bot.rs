use std::sync::Arc;

use scanbot::{Error, RangeReading, Scan};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Environment, RotatingLidar, RotatingLidarConfig, ScanCallback, SonarConfig, SonarSensor,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(default)]
    pub lidar: RotatingLidarConfig,
    #[serde(default)]
    pub sonar: SonarConfig,
}

/// Result of [`Bot::scan_environment`].
#[derive(Debug, Clone)]
pub struct EnvironmentScan {
    pub lidar: Scan,
    pub sonar: RangeReading,
}

/// Bot carrying a rotating lidar and a forward sonar.
#[derive(Debug)]
pub struct Bot {
    lidar: RotatingLidar,
    sonar: SonarSensor,
    initialized: bool,
}

impl Bot {
    pub fn new(config: BotConfig) -> Result<Self, Error> {
        Ok(Self {
            lidar: RotatingLidar::new(config.lidar)?,
            sonar: SonarSensor::new(config.sonar)?,
            initialized: false,
        })
    }

    pub fn lidar(&self) -> &RotatingLidar {
        &self.lidar
    }

    pub fn sonar(&self) -> &SonarSensor {
        &self.sonar
    }

    /// Hands the current state of `environment` to both sensors.
    pub fn update_environment(&self, environment: &Environment) -> Result<(), Error> {
        let context = environment.context();
        self.lidar.set_environment_context(context.clone())?;
        self.sonar.set_environment_context(context)
    }

    pub fn initialize(&mut self) {
        self.lidar.start_scanning();
        self.sonar.enable();
        self.initialized = true;
        info!("Bot: All systems initialized");
    }

    pub fn shutdown(&mut self) {
        self.lidar.stop_continuous_scan();
        self.lidar.stop_scanning();
        self.sonar.disable();
        self.initialized = false;
        info!("Bot: Shutdown complete");
    }

    /// Starts continuous lidar scanning. Requires [`Bot::initialize`].
    pub fn start(&mut self, lidar_callback: Option<ScanCallback>) -> Result<(), Error> {
        if !self.initialized {
            return Err(Error::IllegalState {
                message: "Bot not initialized. Call initialize() first.".to_owned(),
            });
        }
        if self.is_running() {
            warn!("Bot: Already running");
            return Ok(());
        }
        self.lidar.start_continuous_scan(lidar_callback)?;
        info!("Bot: Started with continuous LIDAR scanning");
        Ok(())
    }

    pub fn stop(&mut self) {
        let was_running = self.is_running();
        // Also reaps a scan thread that ended on its own.
        self.lidar.stop_continuous_scan();
        if was_running {
            info!("Bot: Stopped");
        } else {
            warn!("Bot: Already stopped");
        }
    }

    pub fn get_lidar_scan(&self) -> Result<Scan, Error> {
        self.lidar.get_scan()
    }

    pub fn get_latest_lidar_scan(&self) -> Option<Arc<Scan>> {
        self.lidar.get_latest_scan()
    }

    pub fn get_sonar_distance(&self) -> Result<RangeReading, Error> {
        self.sonar.get_distance()
    }

    /// Returns true if the sonar sees something closer than `threshold`.
    pub fn check_obstacles(&self, threshold: f64) -> bool {
        self.sonar.is_obstacle_detected(threshold)
    }

    pub fn scan_environment(&self) -> Result<EnvironmentScan, Error> {
        Ok(EnvironmentScan {
            lidar: self.get_lidar_scan()?,
            sonar: self.get_sonar_distance()?,
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// True while the lidar's continuous scan thread is alive.
    pub fn is_running(&self) -> bool {
        self.lidar.is_continuous_scanning()
    }
}
