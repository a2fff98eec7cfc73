//! Turns one beam angle plus an environment snapshot into a simulated return.

use nalgebra::Point2;
use scanbot::EnvironmentContext;

use crate::geometry::{intersect_circle, intersect_walls, ray_direction};

pub const MIN_INTENSITY: u8 = 50;
pub const MAX_INTENSITY: u8 = 255;

/// Distance to the closest wall or obstacle along `angle`, ignoring any range limit.
pub fn nearest_hit(angle: f64, context: &EnvironmentContext) -> Option<f64> {
    let origin = Point2::new(context.pose.x, context.pose.y);
    let direction = ray_direction(angle);
    intersect_walls(&origin, &direction, &context.bounds)
        .chain(
            context
                .obstacles
                .iter()
                .filter_map(|obstacle| intersect_circle(&origin, &direction, obstacle)),
        )
        .fold(None, |nearest: Option<f64>, t| {
            Some(nearest.map_or(t, |n| n.min(t)))
        })
}

/// Closer returns are brighter. Ties round to even.
pub fn intensity_for(distance: f64, max_range: f64) -> u8 {
    let base = 200.0 - (distance / max_range * 100.0).round_ties_even();
    base.clamp(MIN_INTENSITY as f64, MAX_INTENSITY as f64) as u8
}

/// Simulated `(distance, intensity)` for one beam.
///
/// Returns `(0.0, 0)` when there is no context or when the nearest hit lies beyond
/// `max_range`; the true distance is not reported in that case.
pub fn simulate_reading(
    angle: f64,
    context: Option<&EnvironmentContext>,
    max_range: f64,
) -> (f64, u8) {
    let Some(context) = context else {
        return (0.0, 0);
    };
    match nearest_hit(angle, context) {
        Some(distance) if distance <= max_range => {
            (distance, intensity_for(distance, max_range))
        }
        _ => (0.0, 0),
    }
}
