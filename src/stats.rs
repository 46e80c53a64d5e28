/*
 * Flock Statistics Module
 *
 * Read-only measurements of the population, handy for logging and for a
 * driver's debug overlay:
 * - Centroid of all boids
 * - Mean and maximum speed
 * - Polarization: length of the mean unit heading, 1 when every boid flies
 *   the same way and near 0 when headings cancel out
 */

use glam::DVec2;

use crate::population::Population;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub tick: u64,
    pub centroid: DVec2,
    pub mean_speed: f64,
    pub max_speed: f64,
    pub polarization: f64,
}

impl FlockStats {
    pub fn measure(tick: u64, population: &Population) -> Self {
        let count = population.len().max(1) as f64;

        let centroid = population.positions.iter().fold(DVec2::ZERO, |acc, &p| acc + p) / count;

        let mut speed_sum = 0.0;
        let mut max_speed: f64 = 0.0;
        let mut heading_sum = DVec2::ZERO;
        for v in &population.velocities {
            let speed = v.length();
            speed_sum += speed;
            max_speed = max_speed.max(speed);
            // Stationary boids have no heading
            if speed > 0.0 {
                heading_sum += *v / speed;
            }
        }

        Self {
            tick,
            centroid,
            mean_speed: speed_sum / count,
            max_speed,
            polarization: (heading_sum / count).length(),
        }
    }
}
