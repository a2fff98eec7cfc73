use std::path::Path;

use scanbot::{Obstacle, Pose};
use scanbot_sim::{Bot, BotConfig, Environment, RotatingLidarConfig, SonarConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

/// Arena and sensor setup read from a TOML scenario file.
///
/// ```toml
/// [environment]
/// width = 25.0
/// height = 25.0
///
/// [[environment.obstacles]]
/// x = 5.0
/// y = 5.0
/// radius = 1.0
///
/// [bot]
/// x = 2.0
/// y = 2.0
/// orientation = 90.0
///
/// [lidar]
/// scan_frequency = 2.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Defaults to the center of the arena.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<Pose>,
    #[serde(default)]
    pub lidar: RotatingLidarConfig,
    #[serde(default)]
    pub sonar: SonarConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    #[serde(default = "default_arena_size")]
    pub width: f64,
    #[serde(default = "default_arena_size")]
    pub height: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            width: default_arena_size(),
            height: default_arena_size(),
            obstacles: Vec::new(),
        }
    }
}

fn default_arena_size() -> f64 {
    25.0
}

impl ScenarioConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &fs_err::read_to_string(path.as_ref())
                .map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let config: ScenarioConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))?;
        debug!("{:?} loaded: {config:?}", path.as_ref());
        Ok(config)
    }

    pub fn bot_pose(&self) -> Pose {
        self.bot.unwrap_or_else(|| {
            Pose::new(
                self.environment.width / 2.0,
                self.environment.height / 2.0,
                0.0,
            )
        })
    }

    pub fn bot_config(&self) -> BotConfig {
        BotConfig {
            lidar: self.lidar,
            sonar: self.sonar,
        }
    }

    /// Builds the arena with its obstacles and the bot placed in it.
    pub fn create_environment(&self) -> Result<Environment, Error> {
        let mut environment = Environment::new(self.environment.width, self.environment.height)?;
        for obstacle in &self.environment.obstacles {
            environment.add_obstacle(obstacle.x, obstacle.y, obstacle.radius)?;
        }
        let pose = self.bot_pose();
        environment.set_bot_position(pose.x, pose.y, pose.orientation)?;
        Ok(environment)
    }

    /// Creates the environment and a bot whose sensors already see it.
    pub fn create_bot(&self) -> Result<(Environment, Bot), Error> {
        let environment = self.create_environment()?;
        let bot = Bot::new(self.bot_config())?;
        bot.update_environment(&environment)?;
        Ok((environment, bot))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default() {
        let config = ScenarioConfig::default();
        assert_eq!(config.environment.width, 25.0);
        assert_eq!(config.environment.height, 25.0);
        assert!(config.environment.obstacles.is_empty());
        assert_eq!(config.bot_pose(), Pose::new(12.5, 12.5, 0.0));
        assert_eq!(config.lidar, RotatingLidarConfig::default());

        assert_eq!(ScenarioConfig::from_str("", "empty.toml").unwrap(), config);
    }

    #[test]
    fn test_bot_pose_follows_arena() {
        let config = ScenarioConfig::from_str(
            r#"
[environment]
width = 10.0
height = 4.0
"#,
            "small.toml",
        )
        .unwrap();
        let pose = config.bot_pose();
        assert_approx_eq!(pose.x, 5.0);
        assert_approx_eq!(pose.y, 2.0);
    }

    #[test]
    fn test_parse_failure() {
        let err = ScenarioConfig::from_str("[lidar]\nspeed = 1.0\n", "bad.toml").unwrap_err();
        assert!(matches!(err, Error::TomlParseFailure(..)), "{err:?}");

        let err = ScenarioConfig::try_new("no/such/scenario.toml").unwrap_err();
        assert!(matches!(err, Error::NoFile(..)), "{err:?}");
    }

    #[test]
    fn test_create_environment_rejects_bad_placement() {
        let config = ScenarioConfig::from_str(
            r#"
[[environment.obstacles]]
x = 5.0
y = 5.0
radius = 1.0

[bot]
x = 5.0
y = 5.5
"#,
            "occupied.toml",
        )
        .unwrap();
        assert!(matches!(
            config.create_environment(),
            Err(Error::Scanbot(scanbot::Error::PositionOccupied { .. }))
        ));
    }
}
