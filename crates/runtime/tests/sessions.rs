mod common;

use common::{HERO, Harness, WOODS, flaky_service, oak_tree, seeded_node};
use gathering_core::{
    AppliedEffect, Discipline, ErrorCategory, HotspotKind, MaterialId, NodeError, NodeId,
    RequirementKind, SessionError, SessionStatus, ToolSlot, ValidationError,
};
use gathering_runtime::{
    CollaboratorError, GatheringEvent, GatheringStore, RuntimeError, SessionEvent, Topic,
};

fn oak() -> MaterialId {
    MaterialId::new("oak_log")
}

#[test]
fn single_oak_log_is_gathered_and_collected() {
    let harness = Harness::new();
    let service = &harness.service;

    service.start_session(HERO, &oak(), 1, None).unwrap();
    harness.advance(3_000);

    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.status, SessionStatus::Completed);
    assert_eq!(progress.time_to_next_unit_ms, None);

    let collected = service.collect_session(HERO).unwrap();
    assert_eq!(collected.material, oak());
    assert_eq!(collected.quantity, 1);
    assert_eq!(harness.inventory.quantity(HERO, &oak()).unwrap(), 1);
    assert_eq!(
        service.skill(HERO, Discipline::Woodcutting).unwrap().experience,
        10
    );

    assert!(matches!(
        service.poll_session(HERO),
        Err(RuntimeError::Session(SessionError::NotFound { .. }))
    ));
}

#[test]
fn partial_unit_time_is_retained() {
    let harness = Harness::new();
    let service = &harness.service;

    let started = service.start_session(HERO, &oak(), 10, None).unwrap();
    harness.advance(6_500);

    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.gained, 2);
    assert_eq!(progress.time_to_next_unit_ms, Some(2_500));

    let session = harness.store.session(HERO).unwrap().unwrap().value;
    assert_eq!(
        session.last_settled_at(),
        started.session.started_at + 6_000
    );
}

#[test]
fn polling_twice_at_the_same_instant_changes_nothing() {
    let harness = Harness::new();
    let service = &harness.service;

    service.start_session(HERO, &oak(), 10, None).unwrap();
    harness.advance(7_000);

    let first = service.poll_session(HERO).unwrap();
    let revision = harness.store.snapshot().unwrap().revision();
    let second = service.poll_session(HERO).unwrap();

    assert_eq!(first.completed, second.completed);
    assert_eq!(second.gained, 0);
    assert_eq!(second.experience_gained, 0);
    assert_eq!(harness.store.snapshot().unwrap().revision(), revision);
}

#[test]
fn collect_before_goal_fails_and_writes_nothing() {
    let harness = Harness::new();
    let service = &harness.service;

    service.start_session(HERO, &oak(), 5, None).unwrap();
    harness.advance(4_000);
    let revision = harness.store.snapshot().unwrap().revision();

    let error = service.collect_session(HERO).unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Session(SessionError::NotComplete {
            completed: 1,
            goal: 5
        })
    ));
    assert_eq!(error.category(), Some(ErrorCategory::PreconditionFailed));
    assert_eq!(harness.store.snapshot().unwrap().revision(), revision);
    assert_eq!(harness.inventory.quantity(HERO, &oak()).unwrap(), 0);
}

#[test]
fn failed_grant_keeps_the_session_for_a_retry() {
    let (service, inventory, clock) = flaky_service();
    service.start_session(HERO, &oak(), 1, None).unwrap();
    clock.advance(3_000);

    inventory.set_failing(true);
    let error = service.collect_session(HERO).unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Collaborator(CollaboratorError::Backend(_))
    ));

    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.status, SessionStatus::Completed);
    assert_eq!(progress.banked, 1);
    assert_eq!(progress.gained, 0);

    inventory.set_failing(false);
    let collected = service.collect_session(HERO).unwrap();
    assert_eq!(collected.quantity, 1);
    assert_eq!(collected.experience_gained, 0);
    assert_eq!(inventory.inner.quantity(HERO, &oak()).unwrap(), 1);
    // Experience from the first attempt is credited exactly once.
    assert_eq!(
        service.skill(HERO, Discipline::Woodcutting).unwrap().experience,
        10
    );
}

#[test]
fn failed_cancel_grant_keeps_banked_materials() {
    let (service, inventory, clock) = flaky_service();
    service.start_session(HERO, &oak(), 10, None).unwrap();
    clock.advance(7_000);

    inventory.set_failing(true);
    assert!(service.cancel_session(HERO).is_err());

    inventory.set_failing(false);
    let cancelled = service.cancel_session(HERO).unwrap();
    assert_eq!(cancelled.completed, 2);
    assert_eq!(cancelled.granted, 2);
    assert_eq!(inventory.inner.quantity(HERO, &oak()).unwrap(), 2);
}

#[test]
fn cancel_grants_partial_progress() {
    let harness = Harness::new();
    let service = &harness.service;

    service.start_session(HERO, &oak(), 10, None).unwrap();
    harness.advance(7_000);

    let cancelled = service.cancel_session(HERO).unwrap();
    assert_eq!(cancelled.completed, 2);
    assert_eq!(cancelled.granted, 2);
    assert_eq!(cancelled.experience_gained, 20);
    assert_eq!(harness.inventory.quantity(HERO, &oak()).unwrap(), 2);

    // The slot is free again.
    service.start_session(HERO, &oak(), 1, None).unwrap();
}

#[test]
fn start_validates_in_order() {
    let harness = Harness::seeded();
    let service = &harness.service;

    assert!(matches!(
        service.start_session(HERO, &MaterialId::new("nope"), 0, None),
        Err(RuntimeError::Validation(ValidationError::InvalidGoal { goal: 0 }))
    ));
    assert!(matches!(
        service.start_session(HERO, &MaterialId::new("nope"), 1, None),
        Err(RuntimeError::Session(SessionError::MaterialNotFound { .. }))
    ));
    assert!(matches!(
        service.start_session(HERO, &oak(), 1, Some(NodeId(404))),
        Err(RuntimeError::Node(NodeError::NotFound { .. }))
    ));
    assert!(matches!(
        service.start_session(HERO, &MaterialId::new("copper_ore"), 1, Some(oak_tree())),
        Err(RuntimeError::Session(SessionError::NodeMaterialMismatch { .. }))
    ));

    match service.start_session(HERO, &MaterialId::new("willow_log"), 1, None) {
        Err(RuntimeError::Session(SessionError::RequirementNotMet(requirement))) => {
            assert_eq!(
                requirement.kind,
                RequirementKind::DisciplineLevel(Discipline::Woodcutting)
            );
            assert_eq!(requirement.current, 1);
            assert_eq!(requirement.required, 15);
        }
        other => panic!("unexpected {other:?}"),
    }

    service.start_session(HERO, &oak(), 1, None).unwrap();
    assert!(matches!(
        service.start_session(HERO, &oak(), 1, None),
        Err(RuntimeError::Session(SessionError::AlreadyRunning { .. }))
    ));
}

#[test]
fn refused_start_settles_the_running_session() {
    let harness = Harness::new();
    let service = &harness.service;
    service.start_session(HERO, &oak(), 10, None).unwrap();
    harness.advance(7_000);

    assert!(matches!(
        service.start_session(HERO, &oak(), 1, None),
        Err(RuntimeError::Session(SessionError::AlreadyRunning { .. }))
    ));

    let stored = harness.store.session(HERO).unwrap().unwrap();
    assert_eq!(stored.value.completed(), 2);
    assert_eq!(
        service.skill(HERO, Discipline::Woodcutting).unwrap().experience,
        20
    );
    assert_eq!(service.poll_session(HERO).unwrap().gained, 0);
}

#[test]
fn uninitialized_characters_cannot_gather() {
    let harness = Harness::new();
    let stranger = gathering_core::CharacterId(99);
    harness.characters.set_level(stranger, 5).unwrap();

    let error = harness
        .service
        .start_session(stranger, &oak(), 1, None)
        .unwrap_err();
    assert!(matches!(error, RuntimeError::CharacterNotInitialized { .. }));
    assert_eq!(error.category(), Some(ErrorCategory::NotFound));
}

#[test]
fn node_bound_session_stops_when_node_runs_out() {
    let harness = Harness::seeded();
    let service = &harness.service;

    service.start_session(HERO, &oak(), 10, Some(oak_tree())).unwrap();
    harness.advance(20_000);

    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.gained, 4);
    assert_eq!(progress.completed, 4);
    assert_eq!(progress.forfeited_ms, 8_000);

    let node = service.try_respawn(oak_tree()).unwrap();
    assert!(node.node.is_depleted());

    // Waiting on the depleted node earns nothing.
    harness.advance(30_000);
    let idle = service.poll_session(HERO).unwrap();
    assert_eq!(idle.gained, 0);
    assert_eq!(idle.completed, 4);

    // Fourth unit finished 12 s in; the tree is back 120 s later and the
    // wait before that is dropped.
    harness.advance(82_000);
    let resumed = service.poll_session(HERO).unwrap();
    assert_eq!(resumed.completed, 4);
    assert_eq!(resumed.forfeited_ms, 82_000);
    harness.advance(6_000);
    let resumed = service.poll_session(HERO).unwrap();
    assert_eq!(resumed.completed, 6);
}

#[test]
fn respawn_by_another_reader_still_forfeits_the_wait() {
    let harness = Harness::seeded();
    let service = &harness.service;

    service.start_session(HERO, &oak(), 20, Some(oak_tree())).unwrap();
    harness.advance(30_000);
    assert_eq!(service.poll_session(HERO).unwrap().completed, 4);

    // Depleted 12 s in, back at 132 s. Someone else notices at 200 s.
    harness.advance(170_000);
    let node = service.try_respawn(oak_tree()).unwrap();
    assert!(!node.node.is_depleted());

    let resumed = service.poll_session(HERO).unwrap();
    assert_eq!(resumed.completed, 8);
    assert_eq!(resumed.gained, 4);
    // 102 s waiting on the respawn plus 56 s after the tree ran out again.
    assert_eq!(resumed.forfeited_ms, 158_000);

    harness.advance(12_000);
    let later = service.poll_session(HERO).unwrap();
    assert_eq!(later.completed, 8);
    assert_eq!(later.gained, 0);
}

#[test]
fn expired_hotspot_no_longer_boosts() {
    let harness = Harness::seeded();
    let service = &harness.service;
    let tree = seeded_node(WOODS, 1);

    service
        .promote_hotspot(tree, HotspotKind::Bountiful, 2.0, 60)
        .unwrap();
    let started = service.start_session(HERO, &oak(), 1, Some(tree)).unwrap();
    assert_eq!(started.rates.yield_per_unit, 2);
    assert_eq!(started.rates.experience_per_unit, 20);

    harness.advance(61_000);
    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.rates.yield_per_unit, 1);
    assert!(
        !progress
            .rates
            .applied_effects
            .iter()
            .any(|effect| matches!(effect, AppliedEffect::Hotspot { .. }))
    );
    assert_eq!(progress.banked, 1);
    assert_eq!(progress.experience_gained, 10);
}

#[test]
fn broken_tool_gathers_at_base_speed() {
    let harness = Harness::new();
    let service = &harness.service;

    // Steel hatchet needs woodcutting 30: 100 * 30 * 29 / 2 experience.
    service
        .add_experience(HERO, Discipline::Woodcutting, 43_500)
        .unwrap();
    service
        .equip_tool(HERO, &gathering_core::ToolId::new("steel_hatchet"))
        .unwrap();

    let started = service.start_session(HERO, &oak(), 10, None).unwrap();
    assert_eq!(started.rates.duration_ms, 2_500);

    harness.advance(2_500);
    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.gained, 1);
    assert!(progress.tool_wear.is_some());

    service
        .reduce_tool_durability(HERO, ToolSlot::Hatchet, 100.0)
        .unwrap();
    harness.advance(3_000);
    let progress = service.poll_session(HERO).unwrap();
    assert_eq!(progress.rates.duration_ms, 3_000);
    assert!(
        progress
            .rates
            .applied_effects
            .iter()
            .any(|effect| matches!(effect, AppliedEffect::ToolBroken { .. }))
    );
    assert_eq!(progress.gained, 1);

    let tools = service.tools(HERO).unwrap();
    let hatchet = tools.slot(ToolSlot::Hatchet).unwrap();
    assert!(hatchet.is_broken());
    assert_eq!(hatchet.tool.as_str(), "steel_hatchet");
}

#[test]
fn session_events_are_published() {
    let harness = Harness::new();
    let service = &harness.service;
    let mut sessions = service.events().subscribe(Topic::Session);

    service.start_session(HERO, &oak(), 1, None).unwrap();
    harness.advance(3_000);
    service.collect_session(HERO).unwrap();

    let mut received = Vec::new();
    while let Ok(event) = sessions.try_recv() {
        received.push(event);
    }
    assert!(matches!(
        received.as_slice(),
        [
            GatheringEvent::Session(SessionEvent::Started { .. }),
            GatheringEvent::Session(SessionEvent::Progressed { gained: 1, .. }),
            GatheringEvent::Session(SessionEvent::Completed { .. }),
            GatheringEvent::Session(SessionEvent::Collected { quantity: 1, .. }),
        ]
    ));
}
