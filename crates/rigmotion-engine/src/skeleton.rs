//! Skeleton binding.
//!
//! Resolves the fixed joint path schema against a [`Rig`] and captures each
//! resolved joint's rest pose. Every lookup is independently optional: a
//! missing joint clears its presence bit and short-circuits its subtree, and
//! the pose synthesizer skips those channels. Only a missing armature or hips
//! fails the bind, since nothing below them can be resolved.

use rigmotion_spec::{BoneTransform, JointRole, ARMATURE_NODE, JOINT_PATHS};
use tracing::{debug, warn};

use crate::error::BindError;
use crate::rig::{JointId, Rig};

/// Role-indexed joint handles plus the rest pose captured at bind time.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSkeleton {
    joints: [Option<JointId>; JointRole::COUNT],
    rest: [BoneTransform; JointRole::COUNT],
}

impl BoundSkeleton {
    /// Binds the path schema against a rig.
    pub fn bind(rig: &Rig) -> Result<Self, BindError> {
        let armature = rig
            .find_child(rig.root(), ARMATURE_NODE)
            .ok_or_else(|| BindError::MissingArmature {
                root: rig.joint(rig.root()).name.clone(),
                armature: ARMATURE_NODE.to_string(),
            })?;

        let mut joints = [None; JointRole::COUNT];
        for row in JOINT_PATHS.iter() {
            let parent = match row.parent {
                None => Some(armature),
                Some(parent_role) => joints[parent_role.index()],
            };
            let Some(parent) = parent else {
                debug!(joint = %row.role, "parent joint unresolved; skipping");
                continue;
            };
            match rig.find_child(parent, row.node_name) {
                Some(id) => joints[row.role.index()] = Some(id),
                None if row.role == JointRole::Hips => {
                    return Err(BindError::MissingBone {
                        role: row.role,
                        path: row.role.hierarchy_path(),
                    });
                }
                None => {
                    warn!(
                        joint = %row.role,
                        path = %row.role.hierarchy_path(),
                        "joint not found; channel disabled"
                    );
                }
            }
        }

        let mut rest = [BoneTransform::IDENTITY; JointRole::COUNT];
        for role in JointRole::ALL {
            if let Some(id) = joints[role.index()] {
                rest[role.index()] = rig.local(id);
            }
        }

        Ok(Self { joints, rest })
    }

    /// Handle for a role, if it was resolved.
    pub fn joint(&self, role: JointRole) -> Option<JointId> {
        self.joints[role.index()]
    }

    /// Whether a role was resolved.
    pub fn is_bound(&self, role: JointRole) -> bool {
        self.joints[role.index()].is_some()
    }

    /// Rest pose for a role, if it was resolved.
    pub fn rest(&self, role: JointRole) -> Option<&BoneTransform> {
        self.joints[role.index()].map(|_| &self.rest[role.index()])
    }

    /// Handle and rest pose together, for roles that were resolved.
    pub fn channel(&self, role: JointRole) -> Option<(JointId, &BoneTransform)> {
        self.joints[role.index()].map(|id| (id, &self.rest[role.index()]))
    }

    /// Number of resolved roles.
    pub fn bound_count(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }

    /// Roles that could not be resolved.
    pub fn missing(&self) -> impl Iterator<Item = JointRole> + '_ {
        JointRole::ALL.into_iter().filter(|r| !self.is_bound(*r))
    }

    /// Writes the rest pose back onto every resolved joint.
    pub fn restore_rest(&self, rig: &mut Rig) {
        for role in JointRole::ALL {
            if let Some((id, rest)) = self.channel(role) {
                rig.set_local_rotation(id, rest.rotation);
                rig.set_local_position(id, rest.position);
            }
        }
    }
}
