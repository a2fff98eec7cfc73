use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use parking_lot::RwLock;
use scanbot::{unix_timestamp, EnvironmentContext, Error, RangeReading, RangeSensor};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::range::nearest_hit;

fn default_max_range() -> f64 {
    4.0
}

fn default_min_range() -> f64 {
    0.02
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SonarConfig {
    #[serde(default = "default_max_range")]
    pub max_range: f64,
    #[serde(default = "default_min_range")]
    pub min_range: f64,
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            max_range: default_max_range(),
            min_range: default_min_range(),
        }
    }
}

impl SonarConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(Error::invalid_configuration("max_range", self.max_range));
        }
        if !(self.min_range >= 0.0 && self.min_range < self.max_range) {
            return Err(Error::invalid_configuration("min_range", self.min_range));
        }
        Ok(())
    }
}

/// Forward-facing short-range sensor.
///
/// Casts a single ray along the bot's heading. Without an echo inside `max_range`
/// it reports `max_range`; echoes closer than `min_range` read as `min_range`.
#[derive(Debug)]
pub struct SonarSensor {
    config: SonarConfig,
    enabled: AtomicBool,
    context: RwLock<Option<Arc<EnvironmentContext>>>,
}

impl SonarSensor {
    pub fn new(config: SonarConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            enabled: AtomicBool::new(false),
            context: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &SonarConfig {
        &self.config
    }

    pub fn set_environment_context(&self, context: Option<EnvironmentContext>) -> Result<(), Error> {
        if let Some(context) = &context {
            context.validate()?;
        }
        *self.context.write() = context.map(Arc::new);
        Ok(())
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
        info!("Sonar: Enabled");
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
        info!("Sonar: Disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn get_distance(&self) -> Result<RangeReading, Error> {
        if !self.is_enabled() {
            return Err(Error::IllegalState {
                message: "Sonar is not enabled. Call enable() first.".to_owned(),
            });
        }
        let SonarConfig {
            max_range,
            min_range,
        } = self.config;
        let distance = self
            .context
            .read()
            .as_deref()
            .and_then(|context| nearest_hit(context.pose.orientation, context))
            .filter(|distance| *distance <= max_range)
            .map_or(max_range, |distance| distance.max(min_range));
        Ok(RangeReading {
            distance,
            timestamp: unix_timestamp(),
        })
    }

    /// Returns true if something is closer than `threshold`. Always false while disabled.
    pub fn is_obstacle_detected(&self, threshold: f64) -> bool {
        self.get_distance()
            .is_ok_and(|reading| reading.distance < threshold)
    }
}

impl RangeSensor for SonarSensor {
    fn current_distance(&self) -> Result<RangeReading, Error> {
        self.get_distance()
    }
}
