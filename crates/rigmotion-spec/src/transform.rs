//! World and bone-local transform types.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World placement of a character: position plus yaw about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformState {
    /// World position.
    #[serde(default)]
    pub position: Vec3,
    /// Heading in degrees. Positive values turn right.
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl TransformState {
    /// Creates a transform at a position with a heading.
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
        }
    }

    /// Rotation about +Y for the current heading.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }

    /// Unit facing direction. A heading of zero faces +Z.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Straight-line distance to another transform.
    pub fn distance(&self, other: &TransformState) -> f32 {
        self.position.distance(other.position)
    }
}

/// A bone's transform relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoneTransform {
    /// Local rotation.
    #[serde(default = "identity_rotation")]
    pub rotation: Quat,
    /// Local position.
    #[serde(default)]
    pub position: Vec3,
}

fn identity_rotation() -> Quat {
    Quat::IDENTITY
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl BoneTransform {
    /// Identity transform.
    pub const IDENTITY: BoneTransform = BoneTransform {
        rotation: Quat::IDENTITY,
        position: Vec3::ZERO,
    };

    /// Creates a transform from rotation and position.
    pub fn new(rotation: Quat, position: Vec3) -> Self {
        Self { rotation, position }
    }

    /// Creates a transform with only a position offset.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            position,
        }
    }
}
