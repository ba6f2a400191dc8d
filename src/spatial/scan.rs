//! Expanding-ring radial search over the occupancy index

use std::f32::consts::TAU;

use crate::core::types::{Coord, Vec2};
use crate::spatial::occupancy::{OccupancyIndex, Tag};

/// Find the nearest coordinate holding `tag`, in deterministic sweep order.
///
/// Radius 0 checks the rounded origin itself. Each larger ring r is swept
/// from angle 0 with a step of 1/(2r) radians, which keeps sampling density
/// at roughly one candidate per unit of arc length and bounds total work to
/// O(max_radius^2). "Nearest" therefore means first found by this sweep,
/// ascending radius then ascending angle, not true Euclidean nearest; two
/// equidistant matches break by angle order. At radius 1 the step samples
/// only ~12 points, which can skip adjacent cells.
pub fn find_nearest(
    index: &OccupancyIndex,
    tag: Tag,
    origin: Vec2,
    max_radius: i32,
) -> Option<Coord> {
    find_nearest_excluding(index, tag, origin, max_radius, None)
}

/// Same sweep as [`find_nearest`], skipping one coordinate
///
/// Mate searches use this to keep an agent from matching its own cell.
pub fn find_nearest_excluding(
    index: &OccupancyIndex,
    tag: Tag,
    origin: Vec2,
    max_radius: i32,
    excluded: Option<Coord>,
) -> Option<Coord> {
    let center = origin.rounded();
    if Some(center) != excluded && index.contains(tag, center) {
        return Some(center);
    }

    for r in 1..=max_radius {
        let step = 1.0 / (2.0 * r as f32);
        let mut theta: f32 = 0.0;
        while theta < TAU {
            let candidate = Coord::new(
                (origin.x + r as f32 * theta.cos()).round() as i32,
                (origin.y + r as f32 * theta.sin()).round() as i32,
            );
            if Some(candidate) != excluded && index.contains(tag, candidate) {
                return Some(candidate);
            }
            theta += step;
        }
    }

    None
}
