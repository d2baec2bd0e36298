//! Reference stages and scenarios.

use glam::Vec3;
use rigmotion_engine::{Character, CharacterId, FlagRecorder, Stage};
use rigmotion_spec::{
    BoneNode, CharacterSpec, IntentEvent, JointRole, MotionConfig, Scenario, TransformState,
};

/// Two linked partners facing each other along +Z, `gap` apart.
pub struct PartnerStage {
    pub stage: Stage,
    pub host: CharacterId,
    pub guest: CharacterId,
    pub host_flags: FlagRecorder,
    pub guest_flags: FlagRecorder,
}

/// Builds a [`PartnerStage`] with default motion config.
pub fn partner_stage(gap: f32) -> PartnerStage {
    partner_stage_with(gap, MotionConfig::default())
}

/// Builds a [`PartnerStage`] with a custom motion config.
pub fn partner_stage_with(gap: f32, config: MotionConfig) -> PartnerStage {
    let host_flags = FlagRecorder::new();
    let guest_flags = FlagRecorder::new();
    let mut stage = Stage::new();

    let host = stage.add(
        Character::humanoid("host", config.clone(), TransformState::default())
            .expect("reference rig binds")
            .with_animator(Box::new(host_flags.clone())),
    );
    let guest = stage.add(
        Character::humanoid(
            "guest",
            config,
            TransformState::new(Vec3::new(0.0, 0.0, gap), 180.0),
        )
        .expect("reference rig binds")
        .with_animator(Box::new(guest_flags.clone())),
    );
    stage
        .link_partners(host, guest)
        .expect("both characters exist");

    PartnerStage {
        stage,
        host,
        guest,
        host_flags,
        guest_flags,
    }
}

/// The reference humanoid with `roles` pruned.
pub fn humanoid_without(roles: &[JointRole]) -> BoneNode {
    let mut root = BoneNode::humanoid("Avatar");
    for role in roles {
        root.remove_joint(*role);
    }
    root
}

/// The guest walks up to the host for one second, then the host offers a handshake.
pub fn greeting_scenario() -> Scenario {
    Scenario::new(0.1, 6.0)
        .with_character(CharacterSpec::new("host").with_partner("guest"))
        .with_character(
            CharacterSpec::new("guest")
                .with_partner("host")
                .at(TransformState::new(Vec3::new(0.0, 0.0, 3.0), 180.0)),
        )
        .with_event(IntentEvent::Forward {
            character: "guest".into(),
            start: 0.0,
            end: 1.0,
        })
        .with_event(IntentEvent::Handshake {
            character: "host".into(),
            at: 1.5,
        })
}

/// The greeting scenario as a JSON document.
pub fn greeting_scenario_json() -> String {
    serde_json::to_string_pretty(&greeting_scenario()).expect("scenario serializes")
}
