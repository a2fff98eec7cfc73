use scanbot::{EnvironmentBounds, EnvironmentContext, Error, Obstacle, Pose};
use tracing::info;

/// Rectangular arena with circular obstacles and (optionally) a placed bot.
#[derive(Debug, Clone)]
pub struct Environment {
    bounds: EnvironmentBounds,
    obstacles: Vec<Obstacle>,
    bot_pose: Option<Pose>,
}

impl Environment {
    pub fn new(width: f64, height: f64) -> Result<Self, Error> {
        let bounds = EnvironmentBounds::new(width, height)?;
        info!("Environment: Created {width}m x {height}m environment");
        Ok(Self {
            bounds,
            obstacles: Vec::new(),
            bot_pose: None,
        })
    }

    pub fn bounds(&self) -> EnvironmentBounds {
        self.bounds
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn bot_pose(&self) -> Option<Pose> {
        self.bot_pose
    }

    pub fn is_valid_position(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }

    pub fn is_position_occupied(&self, x: f64, y: f64) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.contains(x, y))
    }

    /// Places the bot. The orientation is normalized into `[0, 360)`.
    pub fn set_bot_position(&mut self, x: f64, y: f64, orientation: f64) -> Result<(), Error> {
        if !self.is_valid_position(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        if self.is_position_occupied(x, y) {
            return Err(Error::PositionOccupied { x, y });
        }
        let pose = Pose::new(x, y, orientation.rem_euclid(360.0));
        pose.validate()?;
        info!(
            "Environment: Bot placed at ({x:.2}, {y:.2}) facing {:.1}°",
            pose.orientation
        );
        self.bot_pose = Some(pose);
        Ok(())
    }

    /// Adds an obstacle whose center must lie inside the arena.
    pub fn add_obstacle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), Error> {
        if !self.is_valid_position(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        self.obstacles.push(Obstacle::new(x, y, radius)?);
        info!("Environment: Added obstacle at ({x:.2}, {y:.2}) with radius {radius:.2}m");
        Ok(())
    }

    pub fn remove_all_obstacles(&mut self) {
        self.obstacles.clear();
        info!("Environment: All obstacles removed");
    }

    /// Snapshot for the sensors. `None` until the bot has been placed.
    pub fn context(&self) -> Option<EnvironmentContext> {
        self.bot_pose.map(|pose| EnvironmentContext {
            pose,
            bounds: self.bounds,
            obstacles: self.obstacles.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_place_bot() {
        let mut env = Environment::new(25.0, 25.0).unwrap();
        assert!(env.context().is_none());

        env.set_bot_position(2.0, 2.0, -90.0).unwrap();
        let pose = env.bot_pose().unwrap();
        assert_approx_eq!(pose.orientation, 270.0);
        let context = env.context().unwrap();
        assert_eq!(context.pose, pose);
        assert!(context.obstacles.is_empty());

        env.set_bot_position(3.0, 3.0, 720.0).unwrap();
        assert_approx_eq!(env.bot_pose().unwrap().orientation, 0.0);
    }

    #[test]
    fn test_place_bot_rejected() {
        let mut env = Environment::new(10.0, 10.0).unwrap();
        env.add_obstacle(5.0, 5.0, 1.0).unwrap();
        assert!(matches!(
            env.set_bot_position(11.0, 5.0, 0.0),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            env.set_bot_position(5.5, 5.5, 0.0),
            Err(Error::PositionOccupied { .. })
        ));
        // Rim is part of the obstacle.
        assert!(env.set_bot_position(6.0, 5.0, 0.0).is_err());
        assert!(env.bot_pose().is_none());
    }

    #[test]
    fn test_obstacles() {
        let mut env = Environment::new(10.0, 10.0).unwrap();
        env.add_obstacle(1.0, 1.0, 0.5).unwrap();
        assert!(matches!(
            env.add_obstacle(-1.0, 1.0, 0.5),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            env.add_obstacle(1.0, 1.0, 0.0),
            Err(Error::InvalidObstacle { .. })
        ));
        assert_eq!(env.obstacles().len(), 1);
        assert!(env.is_position_occupied(1.2, 1.2));

        env.remove_all_obstacles();
        assert!(env.obstacles().is_empty());
        assert!(!env.is_position_occupied(1.2, 1.2));
    }

    #[test]
    fn test_invalid_size() {
        assert!(Environment::new(0.0, 10.0).is_err());
        assert!(Environment::new(10.0, f64::NAN).is_err());
    }
}
