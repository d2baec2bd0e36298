//! Config and scenario validation.
//!
//! Validation never fails fast: every problem is collected into a
//! [`ValidationResult`] so callers can report them all at once.

use std::collections::HashSet;

use glam::Vec3;

use crate::config::MotionConfig;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::scenario::{IntentEvent, Scenario};

/// Validates a motion config.
///
/// # Example
/// ```
/// use rigmotion_spec::{validate_config, MotionConfig};
///
/// let result = validate_config(&MotionConfig::default());
/// assert!(result.is_ok());
/// ```
pub fn validate_config(config: &MotionConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    let loco = &config.locomotion;
    check_non_negative(&mut result, loco.walk_speed, "locomotion.walk_speed");
    check_non_negative(&mut result, loco.turn_speed, "locomotion.turn_speed");
    check_boundary(
        &mut result,
        loco.boundary.min,
        loco.boundary.max,
        "locomotion.boundary",
    );
    if let Some(region) = &loco.boundary.region {
        check_finite_vec(&mut result, region.position, "locomotion.boundary.region.position");
        check_finite(&mut result, region.yaw_degrees, "locomotion.boundary.region.yaw_degrees");
        check_finite_vec(&mut result, region.scale, "locomotion.boundary.region.scale");
        if region.scale.cmpeq(Vec3::ZERO).any() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteValue,
                "region scale must be non-zero on every axis",
                "locomotion.boundary.region.scale",
            ));
        }
    }
    if loco.walk_speed == 0.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ZeroWalkSpeed,
            "walk_speed is 0; forward intent will animate without moving",
            "locomotion.walk_speed",
        ));
    }

    let gait = &config.gait;
    check_non_negative(&mut result, gait.walk_cycle_speed, "gait.walk_cycle_speed");
    check_finite(&mut result, gait.leg_swing_angle, "gait.leg_swing_angle");
    check_finite(&mut result, gait.arm_swing_angle, "gait.arm_swing_angle");
    check_finite(&mut result, gait.knee_angle, "gait.knee_angle");
    check_non_negative(&mut result, gait.body_bounce, "gait.body_bounce");

    check_finite(&mut result, config.idle.breathing_frequency, "idle.breathing_frequency");
    check_non_negative(&mut result, config.idle.breathing_amplitude, "idle.breathing_amplitude");

    let hs = &config.handshake;
    check_non_negative(&mut result, hs.distance, "handshake.distance");
    check_non_negative(&mut result, hs.shake_amplitude, "handshake.shake_amplitude");
    check_finite(&mut result, hs.shake_frequency, "handshake.shake_frequency");
    check_finite(&mut result, hs.shoulder_pitch, "handshake.shoulder_pitch");
    check_finite(&mut result, hs.shoulder_roll, "handshake.shoulder_roll");
    check_finite(&mut result, hs.elbow_bend, "handshake.elbow_bend");
    let windows = [hs.raise_end, hs.shake_end, hs.duration];
    if windows.iter().all(|w| w.is_finite())
        && !(hs.raise_end > 0.0 && hs.raise_end <= hs.shake_end && hs.shake_end <= hs.duration)
    {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidHandshakeWindows,
            format!(
                "handshake windows must satisfy 0 < raise_end <= shake_end <= duration, got {} / {} / {}",
                hs.raise_end, hs.shake_end, hs.duration
            ),
            "handshake",
        ));
    } else {
        check_finite(&mut result, hs.raise_end, "handshake.raise_end");
        check_finite(&mut result, hs.shake_end, "handshake.shake_end");
        check_finite(&mut result, hs.duration, "handshake.duration");
    }
    if hs.distance == 0.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ZeroHandshakeDistance,
            "handshake distance is 0; only coincident characters can shake hands",
            "handshake.distance",
        ));
    }

    result
}

/// Validates a scenario, including its embedded config.
pub fn validate_scenario(scenario: &Scenario) -> ValidationResult {
    let mut result = validate_config(&scenario.config);

    if !(scenario.dt.is_finite() && scenario.dt > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTimeStep,
            format!("dt must be positive, got {}", scenario.dt),
            "dt",
        ));
    }
    check_non_negative(&mut result, scenario.duration, "duration");

    if scenario.characters.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoCharacters,
            "scenario declares no characters",
            "characters",
        ));
    }

    let mut names = HashSet::new();
    for (i, character) in scenario.characters.iter().enumerate() {
        if !names.insert(character.name.as_str()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateCharacterName,
                format!("duplicate character name '{}'", character.name),
                format!("characters[{}].name", i),
            ));
        }
    }

    for (i, character) in scenario.characters.iter().enumerate() {
        match &character.partner {
            Some(partner) if partner == &character.name || !names.contains(partner.as_str()) => {
                result.add_error(ValidationError::with_path(
                    ErrorCode::UnknownCharacter,
                    format!("partner '{}' is not another character in the scenario", partner),
                    format!("characters[{}].partner", i),
                ));
            }
            Some(_) => {}
            None => {
                let requests_handshake = scenario.events.iter().any(|e| {
                    matches!(e, IntentEvent::Handshake { .. }) && e.character() == character.name
                });
                if requests_handshake {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::NoPartner,
                        format!(
                            "'{}' requests a handshake but has no partner; the request will be ignored",
                            character.name
                        ),
                        format!("characters[{}].partner", i),
                    ));
                }
            }
        }
    }

    for (i, event) in scenario.events.iter().enumerate() {
        if !names.contains(event.character()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnknownCharacter,
                format!("event targets unknown character '{}'", event.character()),
                format!("events[{}].character", i),
            ));
        }
        if let IntentEvent::Forward { start, end, .. } | IntentEvent::Turn { start, end, .. } =
            event
        {
            if !(start.is_finite() && end.is_finite()) || end < start {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidEventWindow,
                    format!("event window [{}, {}) is empty or inverted", start, end),
                    format!("events[{}]", i),
                ));
            }
        }
        if let IntentEvent::Handshake { at, .. } | IntentEvent::ForceIdle { at, .. } = event {
            if !(at.is_finite() && *at >= 0.0) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidEventWindow,
                    format!("event time {} must be finite and non-negative", at),
                    format!("events[{}].at", i),
                ));
            }
        }
    }

    result
}

fn check_finite(result: &mut ValidationResult, value: f32, path: &str) -> bool {
    if value.is_finite() {
        return true;
    }
    result.add_error(ValidationError::with_path(
        ErrorCode::NonFiniteValue,
        format!("{} must be finite, got {}", path, value),
        path,
    ));
    false
}

fn check_finite_vec(result: &mut ValidationResult, value: Vec3, path: &str) -> bool {
    if value.is_finite() {
        return true;
    }
    result.add_error(ValidationError::with_path(
        ErrorCode::NonFiniteValue,
        format!("{} must be finite, got {}", path, value),
        path,
    ));
    false
}

fn check_non_negative(result: &mut ValidationResult, value: f32, path: &str) {
    if check_finite(result, value, path) && value < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::NegativeValue,
            format!("{} must be non-negative, got {}", path, value),
            path,
        ));
    }
}

fn check_boundary(result: &mut ValidationResult, min: Vec3, max: Vec3, path: &str) {
    let min_ok = check_finite_vec(result, min, &format!("{}.min", path));
    let max_ok = check_finite_vec(result, max, &format!("{}.max", path));
    if !(min_ok && max_ok) {
        return;
    }
    for (axis, lo, hi) in [("x", min.x, max.x), ("y", min.y, max.y), ("z", min.z, max.z)] {
        if lo > hi {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvertedBoundary,
                format!("boundary min.{} ({}) exceeds max.{} ({})", axis, lo, axis, hi),
                path,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoundaryConfig, HandshakeConfig, LocomotionConfig};
    use crate::scenario::CharacterSpec;

    fn codes(result: &ValidationResult) -> Vec<ErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_default_config_valid() {
        let result = validate_config(&MotionConfig::default());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_inverted_boundary() {
        let config = MotionConfig::default().with_locomotion(LocomotionConfig::default().with_boundary(
            BoundaryConfig::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 5.0)),
        ));
        let result = validate_config(&config);
        assert_eq!(codes(&result), vec![ErrorCode::InvertedBoundary]);
        assert!(result.errors[0].message.contains("min.x"));
    }

    #[test]
    fn test_degenerate_boundary_allowed() {
        // min == max pins the axis, which is how the default keeps characters on the floor.
        let config = MotionConfig::default().with_locomotion(
            LocomotionConfig::default()
                .with_boundary(BoundaryConfig::new(Vec3::splat(2.0), Vec3::splat(2.0))),
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_negative_and_non_finite() {
        let mut config = MotionConfig::default();
        config.locomotion.walk_speed = -1.0;
        config.gait.knee_angle = f32::NAN;

        let result = validate_config(&config);
        assert!(codes(&result).contains(&ErrorCode::NegativeValue));
        assert!(codes(&result).contains(&ErrorCode::NonFiniteValue));
    }

    #[test]
    fn test_handshake_windows() {
        let config = MotionConfig::default()
            .with_handshake(HandshakeConfig::default().with_windows(1.0, 0.5, 3.5));
        let result = validate_config(&config);
        assert_eq!(codes(&result), vec![ErrorCode::InvalidHandshakeWindows]);

        let config = MotionConfig::default()
            .with_handshake(HandshakeConfig::default().with_windows(0.0, 0.5, 3.5));
        assert!(!validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_values_warn() {
        let mut config = MotionConfig::default();
        config.locomotion.walk_speed = 0.0;
        config.handshake.distance = 0.0;

        let result = validate_config(&config);
        assert!(result.is_ok());
        let warnings: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            warnings,
            vec![WarningCode::ZeroWalkSpeed, WarningCode::ZeroHandshakeDistance]
        );
    }

    #[test]
    fn test_scenario_validation() {
        let scenario = Scenario::new(0.1, 1.0)
            .with_character(CharacterSpec::new("a").with_partner("b"))
            .with_character(CharacterSpec::new("b").with_partner("a"));
        assert!(validate_scenario(&scenario).is_ok());

        let scenario = Scenario::new(0.0, 1.0)
            .with_character(CharacterSpec::new("a").with_partner("ghost"))
            .with_character(CharacterSpec::new("a"))
            .with_event(IntentEvent::Forward {
                character: "nobody".into(),
                start: 1.0,
                end: 0.5,
            });
        let result = validate_scenario(&scenario);
        let found = codes(&result);
        assert!(found.contains(&ErrorCode::InvalidTimeStep));
        assert!(found.contains(&ErrorCode::DuplicateCharacterName));
        assert!(found.contains(&ErrorCode::UnknownCharacter));
        assert!(found.contains(&ErrorCode::InvalidEventWindow));
    }

    #[test]
    fn test_scenario_without_partner_warns() {
        let scenario = Scenario::new(0.1, 1.0)
            .with_character(CharacterSpec::new("solo"))
            .with_event(IntentEvent::Handshake {
                character: "solo".into(),
                at: 0.5,
            });
        let result = validate_scenario(&scenario);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::NoPartner);
    }

    #[test]
    fn test_empty_scenario() {
        let result = validate_scenario(&Scenario::new(0.1, 1.0));
        assert_eq!(codes(&result), vec![ErrorCode::NoCharacters]);
    }

    #[test]
    fn test_one_shot_event_time_must_be_non_negative() {
        let pair = || {
            Scenario::new(0.1, 1.0)
                .with_character(CharacterSpec::new("a").with_partner("b"))
                .with_character(CharacterSpec::new("b").with_partner("a"))
        };

        let at_zero = pair().with_event(IntentEvent::Handshake {
            character: "a".into(),
            at: 0.0,
        });
        assert!(validate_scenario(&at_zero).is_ok());

        for at in [-0.5, f32::NAN, f32::INFINITY] {
            let scenario = pair()
                .with_event(IntentEvent::Handshake {
                    character: "a".into(),
                    at,
                })
                .with_event(IntentEvent::ForceIdle {
                    character: "b".into(),
                    at,
                });
            let result = validate_scenario(&scenario);
            assert_eq!(
                codes(&result),
                vec![ErrorCode::InvalidEventWindow, ErrorCode::InvalidEventWindow],
                "at = {}",
                at
            );
            assert_eq!(result.errors[0].path.as_deref(), Some("events[0].at"));
        }
    }
}
