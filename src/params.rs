/*
 * Simulation Parameters Module
 *
 * This module defines the FlockParams struct holding every tunable value of
 * the steering rules. The defaults reproduce the classic rule set; a second
 * preset covers the variant with a wider separation radius and alignment
 * against the whole flock. Parameters are deserializable so a driver can
 * load a partial configuration and fall back to defaults for the rest.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};
use crate::{
    ALIGNMENT_DIVISOR, BOUNDARY_NUDGE, COHESION_DIVISOR, EXTENT_PER_BOID, NEIGHBOR_RADIUS,
    SEPARATION_RADIUS, VELOCITY_LIMIT, WIDE_SEPARATION_RADIUS,
};

/// Which boids contribute to the alignment rule's mean velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentScope {
    /// Only boids inside the neighbor radius.
    #[default]
    Local,
    /// Every other boid in the flock, regardless of distance.
    Global,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub neighbor_radius: f64,
    pub separation_radius: f64,
    pub alignment_scope: AlignmentScope,
    // false: boids are updated in index order, in place, so later boids see
    // earlier boids' new state within the same tick.
    // true: every boid reads the state as it was at the start of the tick.
    pub synchronous_update: bool,
    // Only honored together with synchronous_update
    pub enable_parallel: bool,
    pub cohesion_divisor: f64,
    pub alignment_divisor: f64,
    pub boundary_nudge: f64,
    // Half-width of the square area per boid, in both spawn and containment
    pub extent_per_boid: u32,
    pub velocity_limit: f64,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            neighbor_radius: NEIGHBOR_RADIUS,
            separation_radius: SEPARATION_RADIUS,
            alignment_scope: AlignmentScope::Local,
            synchronous_update: false,
            enable_parallel: false,
            cohesion_divisor: COHESION_DIVISOR,
            alignment_divisor: ALIGNMENT_DIVISOR,
            boundary_nudge: BOUNDARY_NUDGE,
            extent_per_boid: EXTENT_PER_BOID,
            velocity_limit: VELOCITY_LIMIT,
        }
    }
}

impl FlockParams {
    /// Tight separation radius, alignment over local neighbors only.
    pub fn classic() -> Self {
        Self::default()
    }

    /// Wider separation radius, alignment toward the mean velocity of the
    /// entire flock excluding the boid itself.
    pub fn global_alignment() -> Self {
        Self {
            separation_radius: WIDE_SEPARATION_RADIUS,
            alignment_scope: AlignmentScope::Global,
            ..Self::default()
        }
    }

    // Builder-style toggle for the snapshot update mode
    pub fn synchronous(mut self, parallel: bool) -> Self {
        self.synchronous_update = true;
        self.enable_parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        positive("neighbor_radius", self.neighbor_radius)?;
        positive("separation_radius", self.separation_radius)?;
        positive("cohesion_divisor", self.cohesion_divisor)?;
        positive("alignment_divisor", self.alignment_divisor)?;
        positive("velocity_limit", self.velocity_limit)?;

        if !self.boundary_nudge.is_finite() || self.boundary_nudge < 0.0 {
            return Err(FlockError::InvalidParameter {
                name: "boundary_nudge",
                value: self.boundary_nudge,
                reason: "must be finite and not negative",
            });
        }

        if self.extent_per_boid == 0 {
            return Err(FlockError::InvalidParameter {
                name: "extent_per_boid",
                value: 0.0,
                reason: "must be at least 1",
            });
        }

        // Separation only ever looks at boids already in the neighbor set
        if self.separation_radius > self.neighbor_radius {
            warn!(
                "separation_radius {} exceeds neighbor_radius {}; separation is capped by the neighbor radius",
                self.separation_radius, self.neighbor_radius
            );
        }

        if self.enable_parallel && !self.synchronous_update {
            warn!("enable_parallel has no effect without synchronous_update");
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlockError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}
