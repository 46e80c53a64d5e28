/*
 * Steering Rules Module
 *
 * Each rule turns a boid's own state plus its neighborhood into a velocity
 * offset. The offsets are summed into the velocity, the velocity is clamped
 * to the speed limit, and only then is the position advanced.
 *
 * 1. Cohesion: move 1/100 of the way toward the neighbors' centroid
 * 2. Separation: push directly away from each neighbor that is too close
 * 3. Alignment: close 1/8 of the gap to the neighbors' mean velocity
 * 4. Containment: a fixed nudge back inside the square when outside it
 */

use glam::DVec2;

use crate::neighbors::Neighborhood;

/// The square a flock is contained in: `[-half_width, half_width]` on both
/// axes. Boids exactly on the edge count as inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_width: f64,
}

impl Bounds {
    pub fn for_flock(count: usize, extent_per_boid: u32) -> Self {
        Self {
            half_width: count as f64 * f64::from(extent_per_boid),
        }
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.abs().max_element() <= self.half_width
    }
}

// Offset toward the centroid of the neighborhood, zero when it is empty
pub fn cohesion(position: DVec2, neighbors: &Neighborhood, divisor: f64) -> DVec2 {
    match neighbors.mean_position() {
        Some(centre) => (centre - position) / divisor,
        None => DVec2::ZERO,
    }
}

// Unnormalized sum of displacements away from every neighbor closer than
// `radius`, so crowding by several boids pushes harder.
pub fn separation(position: DVec2, neighbors: &Neighborhood, radius: f64) -> DVec2 {
    let mut push = DVec2::ZERO;
    for &other in neighbors.positions() {
        if (other - position).length() < radius {
            push += position - other;
        }
    }
    push
}

// `perceived` is the mean velocity the boid aligns to, if there is one
pub fn alignment(velocity: DVec2, perceived: Option<DVec2>, divisor: f64) -> DVec2 {
    match perceived {
        Some(mean) => (mean - velocity) / divisor,
        None => DVec2::ZERO,
    }
}

pub fn containment(position: DVec2, bounds: &Bounds, nudge: f64) -> DVec2 {
    let mut offset = DVec2::ZERO;

    if position.x < -bounds.half_width {
        offset.x = nudge;
    }
    if position.x > bounds.half_width {
        offset.x = -nudge;
    }
    if position.y < -bounds.half_width {
        offset.y = nudge;
    }
    if position.y > bounds.half_width {
        offset.y = -nudge;
    }

    offset
}

// Rescale to exactly `limit` when faster, keeping the direction
pub fn limit_velocity(velocity: DVec2, limit: f64) -> DVec2 {
    let speed = velocity.length();
    if speed > limit {
        velocity / speed * limit
    } else {
        velocity
    }
}
