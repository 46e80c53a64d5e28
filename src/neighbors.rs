/*
 * Neighbor Query Module
 *
 * Finds every other boid strictly closer than the neighbor radius with a
 * brute-force scan in index order. The result buffers are owned by a
 * Neighborhood and reused between queries to avoid reallocating for every
 * boid on every tick.
 */

use glam::DVec2;

#[derive(Debug, Default, Clone)]
pub struct Neighborhood {
    positions: Vec<DVec2>,
    velocities: Vec<DVec2>,
}

impl Neighborhood {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity),
        }
    }

    // Refill the buffers with the neighbors of boid `index`
    pub fn gather(&mut self, index: usize, positions: &[DVec2], velocities: &[DVec2], radius: f64) {
        self.positions.clear();
        self.velocities.clear();

        let center = positions[index];
        for (j, (&position, &velocity)) in positions.iter().zip(velocities).enumerate() {
            if j == index {
                continue;
            }
            if (position - center).length() < radius {
                self.positions.push(position);
                self.velocities.push(velocity);
            }
        }
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.velocities
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    // None when there is nobody to average over
    pub fn mean_position(&self) -> Option<DVec2> {
        mean(&self.positions)
    }

    pub fn mean_velocity(&self) -> Option<DVec2> {
        mean(&self.velocities)
    }
}

/// Mean velocity of every boid except `index`, used by whole-flock
/// alignment. `None` for a flock of one.
pub fn flock_mean_velocity(velocities: &[DVec2], index: usize) -> Option<DVec2> {
    let others = velocities.len().checked_sub(1).filter(|&n| n > 0)?;
    let sum = velocities
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .fold(DVec2::ZERO, |acc, (_, &v)| acc + v);
    Some(sum / others as f64)
}

// Sequential sum then one division, in index order
fn mean(values: &[DVec2]) -> Option<DVec2> {
    if values.is_empty() {
        return None;
    }
    let sum = values.iter().fold(DVec2::ZERO, |acc, &v| acc + v);
    Some(sum / values.len() as f64)
}
