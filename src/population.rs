/*
 * Population Module
 *
 * The flock's state is kept as two parallel arrays (positions and
 * velocities) indexed by boid number. The index is the only identity a
 * boid has; boids are never added or removed after spawning.
 *
 * Spawning draws integer coordinates uniformly from
 * [-extent * count, extent * count) on each axis, shuffles each axis on its
 * own, and then draws velocities uniformly from [-10, 10) per component.
 */

use glam::DVec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{FlockError, Result};
use crate::INITIAL_SPEED;

#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    pub positions: Vec<DVec2>,
    pub velocities: Vec<DVec2>,
}

impl Population {
    // Build a population from explicit state, checking the array invariants
    pub fn from_parts(positions: Vec<DVec2>, velocities: Vec<DVec2>) -> Result<Self> {
        if positions.len() != velocities.len() {
            return Err(FlockError::LengthMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }
        if positions.is_empty() {
            return Err(FlockError::InvalidCount { count: 0 });
        }
        if let Some(index) = positions
            .iter()
            .zip(&velocities)
            .position(|(p, v)| !p.is_finite() || !v.is_finite())
        {
            return Err(FlockError::NonFiniteState { index });
        }

        Ok(Self {
            positions,
            velocities,
        })
    }

    pub fn spawn<R: Rng + ?Sized>(count: usize, extent_per_boid: u32, rng: &mut R) -> Result<Self> {
        let extent = spawn_extent(count, extent_per_boid)?;

        // All x draws first, then all y draws
        let mut xs: Vec<f64> = (0..count)
            .map(|_| rng.gen_range(-extent..extent) as f64)
            .collect();
        let mut ys: Vec<f64> = (0..count)
            .map(|_| rng.gen_range(-extent..extent) as f64)
            .collect();

        // Each axis is permuted independently of the other
        xs.shuffle(rng);
        ys.shuffle(rng);

        let positions = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| DVec2::new(x, y))
            .collect();

        // Row-major: x then y for each boid in turn
        let velocities = (0..count)
            .map(|_| {
                let vx = rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED);
                let vy = rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED);
                DVec2::new(vx, vy)
            })
            .collect();

        Ok(Self {
            positions,
            velocities,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// Half-width of the spawn square as an integer, rejecting counts whose
// extent cannot be represented.
pub(crate) fn spawn_extent(count: usize, extent_per_boid: u32) -> Result<i64> {
    if count == 0 {
        return Err(FlockError::InvalidCount { count });
    }
    i64::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(i64::from(extent_per_boid)))
        .filter(|&extent| extent > 0)
        .ok_or(FlockError::InvalidCount { count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_fills_both_arrays_inside_the_square() {
        let mut rng = StdRng::seed_from_u64(7);
        let population = Population::spawn(40, 5, &mut rng).unwrap();

        assert_eq!(population.len(), 40);
        assert_eq!(population.velocities.len(), 40);
        for p in &population.positions {
            assert!(p.x >= -200.0 && p.x < 200.0);
            assert!(p.y >= -200.0 && p.y < 200.0);
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
        }
        for v in &population.velocities {
            assert!(v.x >= -10.0 && v.x < 10.0);
            assert!(v.y >= -10.0 && v.y < 10.0);
        }
    }

    #[test]
    fn spawn_is_reproducible_for_a_seed() {
        let a = Population::spawn(25, 5, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = Population::spawn(25, 5, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Population::spawn(0, 5, &mut rng),
            Err(FlockError::InvalidCount { count: 0 })
        );
    }

    #[test]
    fn huge_count_overflowing_the_extent_is_rejected() {
        assert!(spawn_extent(usize::MAX, 5).is_err());
        assert_eq!(spawn_extent(50, 5), Ok(250));
    }

    #[test]
    fn from_parts_checks_lengths_and_finiteness() {
        let err = Population::from_parts(vec![DVec2::ZERO; 2], vec![DVec2::ZERO]).unwrap_err();
        assert_eq!(
            err,
            FlockError::LengthMismatch {
                positions: 2,
                velocities: 1
            }
        );

        let err = Population::from_parts(
            vec![DVec2::ZERO, DVec2::new(f64::INFINITY, 0.0)],
            vec![DVec2::ZERO; 2],
        )
        .unwrap_err();
        assert_eq!(err, FlockError::NonFiniteState { index: 1 });

        assert!(Population::from_parts(Vec::new(), Vec::new()).is_err());
    }
}
