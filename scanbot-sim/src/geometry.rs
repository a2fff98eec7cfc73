//! Ray intersection against the arena walls and circular obstacles.
//!
//! Every function returns the parametric distance `t` along the ray, so with a unit
//! direction `t` is a distance in meters. Only hits strictly in front of the origin
//! (`t > 0`) are reported.

use nalgebra::{Point2, Vector2};
use scanbot::{EnvironmentBounds, Obstacle};

/// Unit direction for an angle in degrees. 0° is +x, 90° is +y.
pub fn ray_direction(angle_deg: f64) -> Vector2<f64> {
    let rad = angle_deg.to_radians();
    Vector2::new(rad.cos(), rad.sin())
}

/// Distances to each wall the ray is heading towards.
///
/// A wall is only considered when the direction has a component pointing at it,
/// e.g. the right wall (`x = width`) requires `direction.x > 0`.
pub fn intersect_walls(
    origin: &Point2<f64>,
    direction: &Vector2<f64>,
    bounds: &EnvironmentBounds,
) -> impl Iterator<Item = f64> {
    let candidates = [
        (direction.x > 0.0).then(|| (bounds.width - origin.x) / direction.x),
        (direction.x < 0.0).then(|| -origin.x / direction.x),
        (direction.y > 0.0).then(|| (bounds.height - origin.y) / direction.y),
        (direction.y < 0.0).then(|| -origin.y / direction.y),
    ];
    candidates.into_iter().flatten().filter(|t| *t > 0.0)
}

/// First positive intersection of the ray with the obstacle's circle.
///
/// Solves `a t² + b t + c = 0`. The near root wins when it is positive, otherwise the
/// far root is used. An origin inside the disk therefore reports the exit point, not 0.
pub fn intersect_circle(
    origin: &Point2<f64>,
    direction: &Vector2<f64>,
    obstacle: &Obstacle,
) -> Option<f64> {
    let offset = origin - Point2::new(obstacle.x, obstacle.y);
    let a = direction.norm_squared();
    let b = 2.0 * direction.dot(&offset);
    let c = offset.norm_squared() - obstacle.radius * obstacle.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_discriminant = discriminant.sqrt();
    let near = (-b - sqrt_discriminant) / (2.0 * a);
    let far = (-b + sqrt_discriminant) / (2.0 * a);
    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        Some(far)
    } else {
        None
    }
}
