//! Locomotion and movement boundary configuration.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

fn default_walk_speed() -> f32 {
    2.0
}

fn default_turn_speed() -> f32 {
    100.0
}

fn default_boundary_min() -> Vec3 {
    Vec3::new(-10.0, 0.0, -10.0)
}

fn default_boundary_max() -> Vec3 {
    Vec3::new(10.0, 0.0, 10.0)
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// Movement speeds and the region characters are confined to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocomotionConfig {
    /// Forward speed in units per second.
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    /// Turn rate in degrees per second.
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,
    /// Movement boundary.
    #[serde(default)]
    pub boundary: BoundaryConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: default_walk_speed(),
            turn_speed: default_turn_speed(),
            boundary: BoundaryConfig::default(),
        }
    }
}

impl LocomotionConfig {
    /// Sets the forward speed.
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Sets the turn rate.
    pub fn with_turn_speed(mut self, degrees_per_second: f32) -> Self {
        self.turn_speed = degrees_per_second;
        self
    }

    /// Sets the boundary.
    pub fn with_boundary(mut self, boundary: BoundaryConfig) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Axis-aligned box, optionally expressed in a movable region's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryConfig {
    /// Per-axis minimum.
    #[serde(default = "default_boundary_min")]
    pub min: Vec3,
    /// Per-axis maximum.
    #[serde(default = "default_boundary_max")]
    pub max: Vec3,
    /// Frame the box is expressed in. World space when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionFrame>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            min: default_boundary_min(),
            max: default_boundary_max(),
            region: None,
        }
    }
}

impl BoundaryConfig {
    /// Creates a world-space box.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            region: None,
        }
    }

    /// Expresses the box in a region's local frame.
    pub fn in_region(mut self, region: RegionFrame) -> Self {
        self.region = Some(region);
        self
    }
}

/// Placement of a bounding region (e.g. a room) in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionFrame {
    /// Region origin in world space.
    #[serde(default)]
    pub position: Vec3,
    /// Region heading in degrees about +Y.
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Region scale.
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

impl Default for RegionFrame {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl RegionFrame {
    /// Creates an unscaled region frame.
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
            scale: Vec3::ONE,
        }
    }

    /// Local-to-world transform of the region.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.yaw_degrees.to_radians()),
            self.position,
        )
    }
}
