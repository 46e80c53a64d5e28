/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure of the flock simulator core.
 * A driver constructs a Flock, calls step() once per tick and reads the
 * positions back for drawing; everything about display lives outside this
 * crate.
 */

// Re-export key components for easier access
pub use error::{FlockError, Result};
pub use flock::Flock;
pub use neighbors::Neighborhood;
pub use params::{AlignmentScope, FlockParams};
pub use population::Population;
pub use rules::Bounds;
pub use stats::FlockStats;

pub use glam::DVec2;

// Define modules
pub mod error;
pub mod flock;
pub mod neighbors;
pub mod params;
pub mod population;
pub mod rules;
pub mod stats;

// Reference rule constants
pub const NEIGHBOR_RADIUS: f64 = 30.0;
pub const SEPARATION_RADIUS: f64 = 10.0;
pub const WIDE_SEPARATION_RADIUS: f64 = 20.0;
pub const COHESION_DIVISOR: f64 = 100.0;
pub const ALIGNMENT_DIVISOR: f64 = 8.0;
pub const BOUNDARY_NUDGE: f64 = 10.0;
pub const EXTENT_PER_BOID: u32 = 5;
pub const VELOCITY_LIMIT: f64 = 50.0;
// Initial velocity components are drawn from [-INITIAL_SPEED, INITIAL_SPEED)
pub const INITIAL_SPEED: f64 = 10.0;
