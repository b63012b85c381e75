//! Closed-form 1-D kinematics

use super::profile::MotionType;

/// Position and velocity at time `t` (seconds)
///
/// Uniform motion ignores `acceleration`. Callers never pass a negative `t`.
#[inline]
pub fn evaluate(t: f64, initial_velocity: f64, acceleration: f64, motion: MotionType) -> (f64, f64) {
    match motion {
        MotionType::Uniform => (initial_velocity * t, initial_velocity),
        MotionType::Accelerated => (
            initial_velocity * t + 0.5 * acceleration * t * t,
            initial_velocity + acceleration * t,
        ),
    }
}

/// Time at which a car starting from rest position reaches `distance`
///
/// `None` if it never gets there (zero velocity and zero acceleration).
pub fn time_to_reach(distance: f64, initial_velocity: f64, acceleration: f64, motion: MotionType) -> Option<f64> {
    if distance <= 0.0 {
        return Some(0.0);
    }
    let a = match motion {
        MotionType::Uniform => 0.0,
        MotionType::Accelerated => acceleration,
    };
    if a == 0.0 {
        if initial_velocity > 0.0 {
            return Some(distance / initial_velocity);
        }
        return None;
    }
    // 0.5 a t² + v0 t - d = 0, positive root
    let disc = initial_velocity * initial_velocity + 2.0 * a * distance;
    Some((-initial_velocity + disc.sqrt()) / a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uniform() {
        let (pos, vel) = evaluate(50.0, 10.0, 0.0, MotionType::Uniform);
        assert_eq!(pos, 500.0);
        assert_eq!(vel, 10.0);
    }

    #[test]
    fn test_uniform_ignores_acceleration() {
        let (pos, vel) = evaluate(2.0, 3.0, 9.0, MotionType::Uniform);
        assert_eq!(pos, 6.0);
        assert_eq!(vel, 3.0);
    }

    #[test]
    fn test_accelerated() {
        let (pos, vel) = evaluate(2.0, 5.0, 4.0, MotionType::Accelerated);
        assert_eq!(pos, 18.0);
        assert_eq!(vel, 13.0);
    }

    #[test]
    fn test_time_to_reach() {
        let t = time_to_reach(500.0, 10.0, 0.0, MotionType::Uniform).unwrap();
        assert!((t - 50.0).abs() < 1e-9);

        let t = time_to_reach(500.0, 5.0, 4.0, MotionType::Accelerated).unwrap();
        assert!((5.0 * t + 2.0 * t * t - 500.0).abs() < 1e-9);
        assert!((t - 14.61).abs() < 0.01);

        assert_eq!(time_to_reach(10.0, 0.0, 0.0, MotionType::Accelerated), None);
        assert_eq!(time_to_reach(0.0, 0.0, 0.0, MotionType::Uniform), Some(0.0));
    }

    proptest! {
        #[test]
        fn prop_uniform_exact(t in 0.0f64..1e4, v0 in 0.0f64..1e3) {
            let (pos, vel) = evaluate(t, v0, 0.0, MotionType::Uniform);
            prop_assert_eq!(pos, v0 * t);
            prop_assert_eq!(vel, v0);
        }

        #[test]
        fn prop_accelerated_exact(t in 0.0f64..1e3, v0 in 0.0f64..1e3, a in 0.0f64..1e2) {
            let (pos, vel) = evaluate(t, v0, a, MotionType::Accelerated);
            prop_assert_eq!(pos, v0 * t + 0.5 * a * t * t);
            prop_assert_eq!(vel, v0 + a * t);
        }

        #[test]
        fn prop_position_monotonic(
            t in 0.0f64..1e3,
            dt in 0.0f64..10.0,
            v0 in 0.0f64..1e3,
            a in 0.0f64..1e2,
            accelerated in any::<bool>(),
        ) {
            let motion = if accelerated { MotionType::Accelerated } else { MotionType::Uniform };
            let (p1, _) = evaluate(t, v0, a, motion);
            let (p2, _) = evaluate(t + dt, v0, a, motion);
            prop_assert!(p2 >= p1);
        }
    }
}
