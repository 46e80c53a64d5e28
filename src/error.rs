/*
 * Error Module
 *
 * Errors surfaced while constructing a flock. Stepping a validly
 * constructed flock cannot fail, so every variant here comes from
 * construction or parameter validation.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    #[error("flock size {count} is invalid: need at least one boid and a representable spawn area")]
    InvalidCount { count: usize },

    #[error("parameter `{name}` = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("state has {positions} positions but {velocities} velocities")]
    LengthMismatch { positions: usize, velocities: usize },

    #[error("boid {index} has a non-finite position or velocity")]
    NonFiniteState { index: usize },
}

pub type Result<T> = std::result::Result<T, FlockError>;
