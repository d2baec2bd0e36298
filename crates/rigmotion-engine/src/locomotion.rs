//! Boundary/locomotion integration.
//!
//! Forward intent moves along the current facing at `walk_speed`; turn
//! intent rotates about +Y at `turn_speed` degrees per second. A forward
//! step is clamped per axis into the configured box, which may be expressed
//! in a movable region's local frame.

use glam::Vec3;
use rigmotion_spec::{BoundaryConfig, LocomotionConfig, TransformState};

use crate::pose::sanitize_dt;

/// Integrates one tick of movement intent.
///
/// `turn` is a signed scalar: positive turns right, negative left. Yaw is
/// kept in `[0, 360)`.
pub fn integrate(
    transform: &TransformState,
    forward: bool,
    turn: f32,
    dt: f32,
    config: &LocomotionConfig,
) -> TransformState {
    let dt = sanitize_dt(dt);
    let turn = if turn.is_finite() { turn } else { 0.0 };

    let yaw_degrees = (transform.yaw_degrees + turn * config.turn_speed * dt).rem_euclid(360.0);
    let mut next = TransformState::new(transform.position, yaw_degrees);

    if forward {
        next.position += next.forward() * config.walk_speed * dt;
        next.position = clamp_to_boundary(next.position, &config.boundary);
    }
    next
}

/// Clamps a world position into the boundary box.
pub fn clamp_to_boundary(position: Vec3, boundary: &BoundaryConfig) -> Vec3 {
    match &boundary.region {
        None => clamp_axes(position, boundary.min, boundary.max),
        Some(region) => {
            let frame = region.to_affine();
            let local = frame.inverse().transform_point3(position);
            frame.transform_point3(clamp_axes(local, boundary.min, boundary.max))
        }
    }
}

// Inverted axes resolve to `max`.
fn clamp_axes(p: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        p.x.max(min.x).min(max.x),
        p.y.max(min.y).min(max.y),
        p.z.max(min.z).min(max.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmotion_spec::RegionFrame;

    #[test]
    fn test_forward_one_second() {
        let config = LocomotionConfig::default();
        let mut t = TransformState::default();
        for i in 1..=10 {
            let next = integrate(&t, true, 0.0, 0.1, &config);
            assert!((next.position.z - t.position.z - 0.2).abs() < 1e-5, "tick {}", i);
            t = next;
        }
        assert!((t.position.z - 2.0).abs() < 1e-4);
        assert!(t.position.x.abs() < 1e-6);
    }

    #[test]
    fn test_turn_wraps_yaw() {
        let config = LocomotionConfig::default();
        let t = TransformState::new(Vec3::ZERO, 350.0);
        let right = integrate(&t, false, 1.0, 0.2, &config);
        assert!((right.yaw_degrees - 10.0).abs() < 1e-4);

        let t = TransformState::default();
        let left = integrate(&t, false, -1.0, 0.5, &config);
        assert!((left.yaw_degrees - 310.0).abs() < 1e-4);
        assert_eq!(left.position, Vec3::ZERO);
    }

    #[test]
    fn test_turn_then_walk_follows_new_facing() {
        let config = LocomotionConfig::default().with_turn_speed(90.0);
        let t = integrate(&TransformState::default(), true, 1.0, 1.0, &config);
        assert!((t.yaw_degrees - 90.0).abs() < 1e-4);
        assert!(t.position.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_clamped_at_boundary() {
        let config = LocomotionConfig::default()
            .with_boundary(BoundaryConfig::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)));
        let mut t = TransformState::default();
        for _ in 0..100 {
            t = integrate(&t, true, 0.0, 0.1, &config);
        }
        assert_eq!(t.position.z, 1.0);
    }

    #[test]
    fn test_turn_only_leaves_position_alone() {
        let config = LocomotionConfig::default()
            .with_boundary(BoundaryConfig::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)));
        let outside = TransformState::new(Vec3::new(5.0, 0.0, 0.0), 0.0);

        let turned = integrate(&outside, false, 1.0, 0.1, &config);
        assert_eq!(turned.position, outside.position);
        assert!(turned.yaw_degrees > 0.0);
        assert_eq!(integrate(&outside, false, 0.0, 0.1, &config), outside);

        let stepped = integrate(&outside, true, 0.0, 0.1, &config);
        let expected = Vec3::new(1.0, 0.0, 0.2);
        assert!(stepped.position.abs_diff_eq(expected, 1e-5), "{:?}", stepped.position);
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let config = LocomotionConfig::default();
        let t = TransformState::new(Vec3::new(1.0, 0.0, 1.0), 45.0);
        assert_eq!(integrate(&t, true, 1.0, 0.0, &config), t);
        assert_eq!(integrate(&t, true, 1.0, -0.5, &config), t);
        assert_eq!(integrate(&t, true, 1.0, f32::NAN, &config), t);
    }

    #[test]
    fn test_region_frame_clamp() {
        // Box of half-width 1 centred at x = 10, rotated 90 degrees.
        let boundary = BoundaryConfig::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 0.0, 2.0))
            .in_region(RegionFrame::new(Vec3::new(10.0, 0.0, 0.0), 90.0));

        let inside = Vec3::new(10.5, 0.0, 0.5);
        assert!(clamp_to_boundary(inside, &boundary).abs_diff_eq(inside, 1e-5));

        // Local z maps to world x under a 90 degree yaw.
        let far = Vec3::new(20.0, 0.0, 0.0);
        let clamped = clamp_to_boundary(far, &boundary);
        assert!(clamped.abs_diff_eq(Vec3::new(12.0, 0.0, 0.0), 1e-4), "{:?}", clamped);
    }
}
