/*
 * Flock Module
 *
 * The Flock owns the population and advances it one tick at a time.
 *
 * Two update orders are supported:
 * - In place (default): boids are processed in index order and each boid's
 *   new velocity and position are written before the next boid looks for
 *   neighbors, so later boids see earlier boids' state from this tick.
 * - Synchronous: every boid reads the state as it was when the tick began.
 *   The per-boid work is independent in this mode and may run on the rayon
 *   pool; the result is identical to the serial synchronous update.
 *
 * Both orders clamp the velocity before moving the boid by it exactly once.
 */

use glam::DVec2;
use log::{debug, log_enabled, trace, Level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::Result;
use crate::neighbors::{flock_mean_velocity, Neighborhood};
use crate::params::{AlignmentScope, FlockParams};
use crate::population::Population;
use crate::rules::{self, Bounds};
use crate::stats::FlockStats;

// Initial capacity of each neighbor buffer
const NEIGHBORHOOD_CAPACITY: usize = 32;

pub struct Flock {
    population: Population,
    params: FlockParams,
    bounds: Bounds,
    tick: u64,
    // Reused by the serial update paths
    neighborhood: Neighborhood,
    // Next velocities for the synchronous update
    scratch: Vec<DVec2>,
}

impl Flock {
    /// Spawns `count` boids with the classic parameters and an entropy
    /// seeded generator.
    pub fn new(count: usize) -> Result<Self> {
        Self::with_rng(count, FlockParams::default(), &mut rand::thread_rng())
    }

    /// Spawns a reproducible flock: the same seed, count and parameters
    /// always give the same trajectory.
    pub fn with_seed(count: usize, params: FlockParams, seed: u64) -> Result<Self> {
        debug!("Seeding flock RNG with {}", seed);
        Self::with_rng(count, params, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(count: usize, params: FlockParams, rng: &mut R) -> Result<Self> {
        params.validate()?;
        let population = Population::spawn(count, params.extent_per_boid, rng)?;
        debug!(
            "Spawned {} boids within +/-{}",
            count,
            count as u64 * u64::from(params.extent_per_boid)
        );
        Ok(Self::assemble(population, params))
    }

    /// Builds a flock from explicit state. Both arrays must be non-empty,
    /// of equal length and finite.
    pub fn from_state(positions: Vec<DVec2>, velocities: Vec<DVec2>, params: FlockParams) -> Result<Self> {
        params.validate()?;
        let population = Population::from_parts(positions, velocities)?;
        debug!("Placed {} boids from explicit state", population.len());
        Ok(Self::assemble(population, params))
    }

    fn assemble(population: Population, params: FlockParams) -> Self {
        let count = population.len();
        Self {
            bounds: Bounds::for_flock(count, params.extent_per_boid),
            neighborhood: Neighborhood::with_capacity(count.min(NEIGHBORHOOD_CAPACITY)),
            scratch: Vec::with_capacity(if params.synchronous_update { count } else { 0 }),
            population,
            params,
            tick: 0,
        }
    }

    /// Advances every boid by one unit of time.
    pub fn step(&mut self) {
        if self.params.synchronous_update {
            self.step_synchronous();
        } else {
            self.step_in_place();
        }
        self.tick += 1;

        if log_enabled!(Level::Trace) {
            let stats = self.stats();
            trace!(
                "tick {}: mean speed {:.3}, max speed {:.3}, polarization {:.3}",
                stats.tick,
                stats.mean_speed,
                stats.max_speed,
                stats.polarization
            );
        }
    }

    pub fn step_n(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.step();
        }
    }

    fn step_in_place(&mut self) {
        let Flock {
            population,
            params,
            bounds,
            neighborhood,
            ..
        } = self;
        let Population {
            positions,
            velocities,
        } = population;

        for i in 0..positions.len() {
            neighborhood.gather(i, positions.as_slice(), velocities.as_slice(), params.neighbor_radius);
            let velocity = steer(i, positions.as_slice(), velocities.as_slice(), neighborhood, params, bounds);

            // Written before the next boid gathers its neighbors
            velocities[i] = velocity;
            positions[i] += velocity;
        }
    }

    fn step_synchronous(&mut self) {
        let Flock {
            population,
            params,
            bounds,
            neighborhood,
            scratch,
            ..
        } = self;
        let count = population.len();
        let positions = population.positions.as_slice();
        let velocities = population.velocities.as_slice();

        scratch.clear();
        scratch.resize(count, DVec2::ZERO);

        if params.enable_parallel {
            // Chunk the work to keep the number of rayon tasks down
            let chunk_size = std::cmp::max(count / rayon::current_num_threads(), 1);
            let params = &*params;
            let bounds = &*bounds;

            scratch
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each_init(
                    || Neighborhood::with_capacity(NEIGHBORHOOD_CAPACITY),
                    |hood, (chunk_idx, chunk)| {
                        for (i_in_chunk, next) in chunk.iter_mut().enumerate() {
                            let i = chunk_idx * chunk_size + i_in_chunk;
                            hood.gather(i, positions, velocities, params.neighbor_radius);
                            *next = steer(i, positions, velocities, hood, params, bounds);
                        }
                    },
                );
        } else {
            for (i, next) in scratch.iter_mut().enumerate() {
                neighborhood.gather(i, positions, velocities, params.neighbor_radius);
                *next = steer(i, positions, velocities, neighborhood, params, bounds);
            }
        }

        for ((position, velocity), &next) in population
            .positions
            .iter_mut()
            .zip(population.velocities.iter_mut())
            .zip(scratch.iter())
        {
            *velocity = next;
            *position += next;
        }
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.population.positions
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.population.velocities
    }

    // Separate x and y columns, the shape a scatter plot consumes
    pub fn position_columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.population.positions.iter().map(|p| (p.x, p.y)).unzip()
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    // A constructed flock always has at least one boid
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Number of completed steps.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn stats(&self) -> FlockStats {
        FlockStats::measure(self.tick, &self.population)
    }
}

// New, speed-limited velocity of boid `index` given its gathered neighborhood
fn steer(
    index: usize,
    positions: &[DVec2],
    velocities: &[DVec2],
    neighborhood: &Neighborhood,
    params: &FlockParams,
    bounds: &Bounds,
) -> DVec2 {
    let position = positions[index];
    let velocity = velocities[index];

    if neighborhood.is_empty() {
        trace!("boid {} has no neighbors within {}", index, params.neighbor_radius);
    }

    let perceived = match params.alignment_scope {
        AlignmentScope::Local => neighborhood.mean_velocity(),
        AlignmentScope::Global => flock_mean_velocity(velocities, index),
    };

    let offset = rules::cohesion(position, neighborhood, params.cohesion_divisor)
        + rules::separation(position, neighborhood, params.separation_radius)
        + rules::alignment(velocity, perceived, params.alignment_divisor)
        + rules::containment(position, bounds, params.boundary_nudge);

    rules::limit_velocity(velocity + offset, params.velocity_limit)
}
