use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Position (in meters) and heading (in degrees, counter-clockwise from +x) of the bot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub orientation: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, orientation: f64) -> Self {
        Self { x, y, orientation }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.x.is_finite() && self.y.is_finite() && self.orientation.is_finite() {
            Ok(())
        } else {
            Err(Error::invalid_configuration(
                "pose",
                format!("({}, {}, {})", self.x, self.y, self.orientation),
            ))
        }
    }
}

/// Size of the arena. The four walls are at `x = 0`, `x = width`, `y = 0` and `y = height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentBounds {
    pub width: f64,
    pub height: f64,
}

impl EnvironmentBounds {
    pub fn new(width: f64, height: f64) -> Result<Self, Error> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::invalid_configuration("width", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::invalid_configuration("height", self.height));
        }
        Ok(())
    }

    /// Returns true if the point lies inside the arena, walls included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Circular obstacle. The disk is closed, so points on the rim are inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Result<Self, Error> {
        let obstacle = Self { x, y, radius };
        obstacle.validate()?;
        Ok(obstacle)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius > 0.0
        {
            Ok(())
        } else {
            Err(Error::InvalidObstacle {
                x: self.x,
                y: self.y,
                radius: self.radius,
            })
        }
    }

    pub fn distance_to_center(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_to_center(x, y) <= self.radius
    }
}

/// Snapshot of everything a sensor needs to cast rays: where the bot is, how big the
/// arena is and which obstacles are in it.
///
/// Sensors never mutate a context. Updating the world means building a new one and
/// handing it to the sensor, which uses it from the next sweep on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    pub pose: Pose,
    pub bounds: EnvironmentBounds,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl EnvironmentContext {
    pub fn new(
        pose: Pose,
        bounds: EnvironmentBounds,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, Error> {
        let context = Self {
            pose,
            bounds,
            obstacles,
        };
        context.validate()?;
        Ok(context)
    }

    /// Rejects values that would poison the ray caster with NaN or negative radii.
    pub fn validate(&self) -> Result<(), Error> {
        self.pose.validate()?;
        self.bounds.validate()?;
        self.obstacles.iter().try_for_each(Obstacle::validate)
    }
}
