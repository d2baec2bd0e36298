//! Flattened joint arena built from an imported bone hierarchy.

use glam::{Affine3A, Quat, Vec3};
use rigmotion_spec::{BoneNode, BoneTransform};

/// Handle to a joint in a [`Rig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(usize);

impl JointId {
    /// Index into the rig's joint table.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One joint of the rig.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    /// Node name.
    pub name: String,
    /// Parent joint, `None` for the root.
    pub parent: Option<JointId>,
    /// Children in hierarchy order.
    pub children: Vec<JointId>,
    /// Current local transform.
    pub local: BoneTransform,
}

/// Joint arena. Joint 0 is the character root; parents always precede children.
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    joints: Vec<Joint>,
}

impl Rig {
    /// Flattens a hierarchy into an arena, depth-first.
    pub fn from_hierarchy(root: &BoneNode) -> Self {
        let mut rig = Self {
            joints: Vec::with_capacity(root.node_count()),
        };
        rig.push_subtree(root, None);
        rig
    }

    /// The reference humanoid rig.
    pub fn humanoid() -> Self {
        Self::from_hierarchy(&BoneNode::humanoid("Avatar"))
    }

    fn push_subtree(&mut self, node: &BoneNode, parent: Option<JointId>) -> JointId {
        let id = JointId(self.joints.len());
        self.joints.push(Joint {
            name: node.name.clone(),
            parent,
            children: Vec::with_capacity(node.children.len()),
            local: BoneTransform::new(node.rotation, node.position),
        });
        for child in &node.children {
            let child_id = self.push_subtree(child, Some(id));
            self.joints[id.0].children.push(child_id);
        }
        id
    }

    /// The character root.
    pub fn root(&self) -> JointId {
        JointId(0)
    }

    /// Number of joints, including the root.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Whether the rig is empty.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// All joints in arena order.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Looks up a joint.
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.0]
    }

    /// Finds a direct child of `parent` by exact name.
    pub fn find_child(&self, parent: JointId, name: &str) -> Option<JointId> {
        self.joints[parent.0]
            .children
            .iter()
            .copied()
            .find(|c| self.joints[c.0].name == name)
    }

    /// Current local transform of a joint.
    pub fn local(&self, id: JointId) -> BoneTransform {
        self.joints[id.0].local
    }

    /// Overwrites a joint's local rotation.
    pub fn set_local_rotation(&mut self, id: JointId, rotation: Quat) {
        self.joints[id.0].local.rotation = rotation;
    }

    /// Overwrites a joint's local position.
    pub fn set_local_position(&mut self, id: JointId, position: Vec3) {
        self.joints[id.0].local.position = position;
    }

    /// Transform from a joint's space to the character root's space.
    pub fn model_transform(&self, id: JointId) -> Affine3A {
        let joint = &self.joints[id.0];
        let local = Affine3A::from_rotation_translation(joint.local.rotation, joint.local.position);
        match joint.parent {
            Some(parent) => self.model_transform(parent) * local,
            None => local,
        }
    }

    /// Joint origin in the character root's space.
    pub fn model_position(&self, id: JointId) -> Vec3 {
        self.model_transform(id).translation.into()
    }
}
