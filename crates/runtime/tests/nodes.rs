mod common;

use common::{Harness, MINES, WOODS, oak_tree, seeded_node, willow_tree};
use gathering_core::{
    ErrorCategory, HotspotKind, NodeError, NodePhase, ValidationError, ZoneId,
};
use gathering_runtime::{GatheringEvent, NodeEvent, RuntimeError, Topic};

#[test]
fn seeding_uses_the_zone_spawn_table() {
    let harness = Harness::new();
    let nodes = harness.service.seed_zone(WOODS).unwrap();

    assert_eq!(nodes.len(), 10);
    assert_eq!(nodes[0].id(), oak_tree());
    assert_eq!(nodes[0].node.max_durability(), 4);
    assert_eq!(nodes[3].id(), willow_tree());
    assert_eq!(nodes[3].node.max_durability(), 3);
    assert!(nodes.iter().all(|view| view.phase == NodePhase::Active));

    let error = harness.service.seed_zone(WOODS).unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::ZoneAlreadySeeded { nodes: 10, .. }
    ));
    assert!(matches!(
        harness.service.seed_zone(ZoneId(77)),
        Err(RuntimeError::ZoneNotFound { .. })
    ));
}

#[test]
fn node_depletes_and_respawns() {
    let harness = Harness::seeded();
    let service = &harness.service;

    for remaining in [2, 1, 0] {
        let view = service.harvest_node(willow_tree()).unwrap();
        assert_eq!(view.node.durability(), remaining);
    }

    let error = service.harvest_node(willow_tree()).unwrap_err();
    assert!(matches!(error, RuntimeError::Node(NodeError::Depleted { .. })));
    assert_eq!(error.category(), Some(ErrorCategory::PreconditionFailed));

    // Still waiting.
    harness.advance(299_999);
    let view = service.try_respawn(willow_tree()).unwrap();
    assert!(matches!(view.phase, NodePhase::Depleted { .. }));

    harness.advance(1);
    let view = service.try_respawn(willow_tree()).unwrap();
    assert_eq!(view.node.durability(), 3);
    assert_eq!(view.phase, NodePhase::Active);
}

#[test]
fn available_nodes_hide_depleted_ones() {
    let harness = Harness::seeded();
    let service = &harness.service;

    for _ in 0..4 {
        service.harvest_node(oak_tree()).unwrap();
    }
    let available = service.available_nodes(WOODS).unwrap();
    assert_eq!(available.len(), 9);
    assert!(available.iter().all(|view| view.id() != oak_tree()));

    harness.advance(120_000);
    let available = service.available_nodes(WOODS).unwrap();
    assert_eq!(available.len(), 10);
    assert_eq!(available[0].id(), oak_tree());

    assert_eq!(service.available_nodes(MINES).unwrap().len(), 8);
    assert!(matches!(
        service.available_nodes(ZoneId(9)),
        Err(RuntimeError::ZoneNotFound { .. })
    ));
}

#[test]
fn hotspots_are_validated_and_expire() {
    let harness = Harness::seeded();
    let service = &harness.service;
    let node = seeded_node(WOODS, 1);
    let mut node_events = service.events().subscribe(Topic::Node);

    assert!(matches!(
        service.promote_hotspot(node, HotspotKind::Ancient, 0.0, 60),
        Err(RuntimeError::Node(NodeError::Validation(
            ValidationError::InvalidMultiplier { .. }
        )))
    ));
    assert!(matches!(
        service.promote_hotspot(node, HotspotKind::Ancient, 2.0, 0),
        Err(RuntimeError::Node(NodeError::Validation(
            ValidationError::InvalidDuration { .. }
        )))
    ));

    let hotspot = service
        .promote_hotspot(node, HotspotKind::Ancient, 2.0, 60)
        .unwrap();
    assert!(matches!(
        service.promote_hotspot(node, HotspotKind::Bountiful, 3.0, 60),
        Err(RuntimeError::Node(NodeError::AlreadyHotspot { .. }))
    ));

    harness.advance(60_000);
    assert!(service.try_respawn(node).unwrap().is_hotspot());
    harness.advance(1);
    assert!(!service.try_respawn(node).unwrap().is_hotspot());

    assert!(matches!(
        node_events.try_recv().unwrap(),
        GatheringEvent::Node(NodeEvent::HotspotPromoted { expires_at, .. })
            if expires_at == hotspot.expires_at
    ));
    assert!(matches!(
        node_events.try_recv().unwrap(),
        GatheringEvent::Node(NodeEvent::HotspotExpired {
            kind: HotspotKind::Ancient,
            ..
        })
    ));

    // A lapsed hotspot can be promoted again.
    service
        .promote_hotspot(node, HotspotKind::Bountiful, 1.5, 30)
        .unwrap();
}

#[test]
fn harvesting_an_unknown_node_is_not_found() {
    let harness = Harness::seeded();
    let error = harness
        .service
        .harvest_node(seeded_node(WOODS, 500))
        .unwrap_err();
    assert_eq!(error.category(), Some(ErrorCategory::NotFound));
    assert_eq!(error.error_code(), "node_not_found");
}
