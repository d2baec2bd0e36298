//! Joint roles and the declarative path table used to resolve them.
//!
//! A humanoid rig is addressed by role rather than by raw node name. Each
//! role knows the node name it is looked up by and the role it hangs off,
//! which together form the fixed path schema:
//!
//! ```text
//! Armature/Hips/Spine/Chest/{Left,Right} shoulder/{Left,Right} arm/{Left,Right} elbow/{Left,Right} wrist
//! Armature/Hips/{Left,Right} leg/{Left,Right} knee/{Left,Right} ankle
//! ```

use serde::{Deserialize, Serialize};

/// Name of the node directly below the character root that holds the skeleton.
pub const ARMATURE_NODE: &str = "Armature";

/// Body side for paired joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Character's left.
    Left,
    /// Character's right.
    Right,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Skeletal joint roles driven by the pose synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointRole {
    Hips,
    Spine,
    Chest,
    LeftShoulder,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightShoulder,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

/// One row of the path table: a role, the role it is found under, and its node name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointPath {
    /// The role being resolved.
    pub role: JointRole,
    /// Parent role, or `None` when the joint hangs directly off the armature.
    pub parent: Option<JointRole>,
    /// Node name searched for among the parent's children.
    pub node_name: &'static str,
}

const fn path(role: JointRole, parent: Option<JointRole>, node_name: &'static str) -> JointPath {
    JointPath {
        role,
        parent,
        node_name,
    }
}

/// The path schema, ordered so that every parent precedes its children.
pub const JOINT_PATHS: [JointPath; JointRole::COUNT] = [
    path(JointRole::Hips, None, "Hips"),
    path(JointRole::Spine, Some(JointRole::Hips), "Spine"),
    path(JointRole::Chest, Some(JointRole::Spine), "Chest"),
    path(JointRole::LeftShoulder, Some(JointRole::Chest), "Left shoulder"),
    path(JointRole::LeftUpperArm, Some(JointRole::LeftShoulder), "Left arm"),
    path(JointRole::LeftLowerArm, Some(JointRole::LeftUpperArm), "Left elbow"),
    path(JointRole::LeftHand, Some(JointRole::LeftLowerArm), "Left wrist"),
    path(JointRole::RightShoulder, Some(JointRole::Chest), "Right shoulder"),
    path(JointRole::RightUpperArm, Some(JointRole::RightShoulder), "Right arm"),
    path(JointRole::RightLowerArm, Some(JointRole::RightUpperArm), "Right elbow"),
    path(JointRole::RightHand, Some(JointRole::RightLowerArm), "Right wrist"),
    path(JointRole::LeftUpperLeg, Some(JointRole::Hips), "Left leg"),
    path(JointRole::LeftLowerLeg, Some(JointRole::LeftUpperLeg), "Left knee"),
    path(JointRole::LeftFoot, Some(JointRole::LeftLowerLeg), "Left ankle"),
    path(JointRole::RightUpperLeg, Some(JointRole::Hips), "Right leg"),
    path(JointRole::RightLowerLeg, Some(JointRole::RightUpperLeg), "Right knee"),
    path(JointRole::RightFoot, Some(JointRole::RightLowerLeg), "Right ankle"),
];

impl JointRole {
    /// Number of joint roles.
    pub const COUNT: usize = 17;

    /// All roles in path-table order.
    pub const ALL: [JointRole; JointRole::COUNT] = [
        JointRole::Hips,
        JointRole::Spine,
        JointRole::Chest,
        JointRole::LeftShoulder,
        JointRole::LeftUpperArm,
        JointRole::LeftLowerArm,
        JointRole::LeftHand,
        JointRole::RightShoulder,
        JointRole::RightUpperArm,
        JointRole::RightLowerArm,
        JointRole::RightHand,
        JointRole::LeftUpperLeg,
        JointRole::LeftLowerLeg,
        JointRole::LeftFoot,
        JointRole::RightUpperLeg,
        JointRole::RightLowerLeg,
        JointRole::RightFoot,
    ];

    /// Dense index of this role, matching its position in [`JOINT_PATHS`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Path table row for this role.
    pub fn path(&self) -> &'static JointPath {
        &JOINT_PATHS[self.index()]
    }

    /// Node name this role is looked up by.
    pub fn node_name(&self) -> &'static str {
        self.path().node_name
    }

    /// Parent role in the path schema.
    pub fn parent(&self) -> Option<JointRole> {
        self.path().parent
    }

    /// Body side, if this is a paired joint.
    pub fn side(&self) -> Option<Side> {
        match self {
            JointRole::Hips | JointRole::Spine | JointRole::Chest => None,
            JointRole::LeftShoulder
            | JointRole::LeftUpperArm
            | JointRole::LeftLowerArm
            | JointRole::LeftHand
            | JointRole::LeftUpperLeg
            | JointRole::LeftLowerLeg
            | JointRole::LeftFoot => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }

    /// Upper leg for a side.
    pub fn upper_leg(side: Side) -> JointRole {
        match side {
            Side::Left => JointRole::LeftUpperLeg,
            Side::Right => JointRole::RightUpperLeg,
        }
    }

    /// Lower leg (knee) for a side.
    pub fn lower_leg(side: Side) -> JointRole {
        match side {
            Side::Left => JointRole::LeftLowerLeg,
            Side::Right => JointRole::RightLowerLeg,
        }
    }

    /// Upper arm for a side.
    pub fn upper_arm(side: Side) -> JointRole {
        match side {
            Side::Left => JointRole::LeftUpperArm,
            Side::Right => JointRole::RightUpperArm,
        }
    }

    /// Lower arm (elbow) for a side.
    pub fn lower_arm(side: Side) -> JointRole {
        match side {
            Side::Left => JointRole::LeftLowerArm,
            Side::Right => JointRole::RightLowerArm,
        }
    }

    /// Slash-separated path from the armature to this joint.
    pub fn hierarchy_path(&self) -> String {
        let mut names = vec![self.node_name()];
        let mut current = self.parent();
        while let Some(role) = current {
            names.push(role.node_name());
            current = role.parent();
        }
        names.push(ARMATURE_NODE);
        names.reverse();
        names.join("/")
    }
}

impl std::fmt::Display for JointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node_name())
    }
}
