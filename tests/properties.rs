//! Property-based tests using proptest
//!
//! Invariants that must hold for any seed, flock size and number of ticks.

use flock_sim::{DVec2, Flock, FlockParams};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = FlockParams> {
    (any::<bool>(), any::<bool>()).prop_map(|(global, synchronous)| {
        let params = if global {
            FlockParams::global_alignment()
        } else {
            FlockParams::classic()
        };
        if synchronous {
            params.synchronous(false)
        } else {
            params
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Property: every velocity respects the limit after every step
    #[test]
    fn velocities_stay_within_the_limit(
        seed in any::<u64>(),
        count in 1usize..40,
        ticks in 1usize..15,
        params in params_strategy(),
    ) {
        let limit = params.velocity_limit;
        let mut flock = Flock::with_seed(count, params, seed).unwrap();
        for _ in 0..ticks {
            flock.step();
            for v in flock.velocities() {
                prop_assert!(v.length() <= limit + 1e-9, "speed {} over limit", v.length());
            }
        }
    }

    // Property: the state stays finite, even for a lone boid
    #[test]
    fn state_stays_finite(seed in any::<u64>(), count in 1usize..25) {
        let mut flock = Flock::with_seed(count, FlockParams::default(), seed).unwrap();
        flock.step_n(20);
        prop_assert_eq!(flock.len(), count);
        prop_assert!(flock.positions().iter().all(|p| p.is_finite()));
        prop_assert!(flock.velocities().iter().all(|v| v.is_finite()));
    }

    // Property: spawned boids sit on integer coordinates inside the square
    #[test]
    fn spawn_stays_inside_the_square(seed in any::<u64>(), count in 1usize..60) {
        let flock = Flock::with_seed(count, FlockParams::default(), seed).unwrap();
        let extent = 5.0 * count as f64;
        for p in flock.positions() {
            prop_assert!(p.x >= -extent && p.x < extent);
            prop_assert!(p.y >= -extent && p.y < extent);
            prop_assert_eq!(*p, DVec2::new(p.x.trunc(), p.y.trunc()));
        }
    }

    // Property: a boid beyond the right edge gets pushed left on its next step
    #[test]
    fn containment_points_inward(overshoot in 0.5f64..500.0, y in -4.0f64..4.0) {
        let start = DVec2::new(5.0 + overshoot, y);
        let mut flock = Flock::from_state(vec![start], vec![DVec2::ZERO], FlockParams::default()).unwrap();
        flock.step();
        prop_assert!(flock.velocities()[0].x < 0.0);
        prop_assert!(flock.positions()[0].x < start.x);
    }
}
