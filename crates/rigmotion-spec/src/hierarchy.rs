//! Named bone hierarchy handed over by asset import.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::joint::{JointRole, ARMATURE_NODE, JOINT_PATHS};

/// One node of the imported scene tree under a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoneNode {
    /// Node name, matched exactly during binding.
    pub name: String,
    /// Local rotation at import time.
    #[serde(default = "identity_rotation")]
    pub rotation: Quat,
    /// Local position at import time.
    #[serde(default)]
    pub position: Vec3,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoneNode>,
}

fn identity_rotation() -> Quat {
    Quat::IDENTITY
}

impl BoneNode {
    /// Creates a leaf node at the origin with identity rotation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            children: Vec::new(),
        }
    }

    /// Sets the local position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the local rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Adds a child node.
    pub fn with_child(mut self, child: BoneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Finds a direct child by name.
    pub fn child(&self, name: &str) -> Option<&BoneNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable lookup of a direct child by name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut BoneNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Removes a direct child (and its subtree) by name. Returns whether one was removed.
    pub fn remove_child(&mut self, name: &str) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.name != name);
        self.children.len() != before
    }

    /// Removes the node a joint role resolves to, along with its subtree.
    ///
    /// `self` is the character root. Returns whether a node was removed.
    pub fn remove_joint(&mut self, role: JointRole) -> bool {
        let mut chain = vec![role.node_name()];
        let mut parent = role.parent();
        while let Some(p) = parent {
            chain.push(p.node_name());
            parent = p.parent();
        }
        chain.push(ARMATURE_NODE);

        let Some((leaf, ancestors)) = chain.split_first() else {
            return false;
        };
        let mut node = self;
        for name in ancestors.iter().rev() {
            match node.child_mut(name) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.remove_child(leaf)
    }

    /// Total node count including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(BoneNode::node_count).sum::<usize>()
    }

    /// Parses a hierarchy from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds a complete humanoid hierarchy following the joint path schema.
    ///
    /// The root is the character node; its only child is the armature.
    pub fn humanoid(root_name: impl Into<String>) -> Self {
        let mut nodes: Vec<BoneNode> = JOINT_PATHS
            .iter()
            .map(|p| BoneNode::new(p.node_name).with_position(default_offset(p.role)))
            .collect();

        // Attach children to parents, deepest rows first so subtrees are complete.
        for row in JOINT_PATHS.iter().rev() {
            if let Some(parent) = row.parent {
                let node = std::mem::replace(&mut nodes[row.role.index()], BoneNode::new(""));
                nodes[parent.index()].children.insert(0, node);
            }
        }

        let hips = std::mem::replace(&mut nodes[JointRole::Hips.index()], BoneNode::new(""));
        BoneNode::new(root_name).with_child(BoneNode::new(ARMATURE_NODE).with_child(hips))
    }
}

/// Rough bind offsets for the reference humanoid, in meters.
fn default_offset(role: JointRole) -> Vec3 {
    match role {
        JointRole::Hips => Vec3::new(0.0, 0.95, 0.0),
        JointRole::Spine => Vec3::new(0.0, 0.1, 0.0),
        JointRole::Chest => Vec3::new(0.0, 0.25, 0.0),
        JointRole::LeftShoulder => Vec3::new(-0.05, 0.2, 0.0),
        JointRole::RightShoulder => Vec3::new(0.05, 0.2, 0.0),
        JointRole::LeftUpperArm => Vec3::new(-0.12, 0.0, 0.0),
        JointRole::RightUpperArm => Vec3::new(0.12, 0.0, 0.0),
        JointRole::LeftLowerArm | JointRole::RightLowerArm => Vec3::new(0.0, -0.28, 0.0),
        JointRole::LeftHand | JointRole::RightHand => Vec3::new(0.0, -0.25, 0.0),
        JointRole::LeftUpperLeg => Vec3::new(-0.1, -0.05, 0.0),
        JointRole::RightUpperLeg => Vec3::new(0.1, -0.05, 0.0),
        JointRole::LeftLowerLeg | JointRole::RightLowerLeg => Vec3::new(0.0, -0.42, 0.0),
        JointRole::LeftFoot | JointRole::RightFoot => Vec3::new(0.0, -0.4, 0.0),
    }
}
