//! Integration tests for entity lifecycle and refresh ordering.

use keystone::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Health(u32);
impl Component for Health {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tag;
impl Component for Tag {}

/// Records every notification it receives.
#[derive(Default)]
struct Recorder {
    added: Vec<Entity>,
    removed: Vec<Entity>,
}

impl EntityObserver for Recorder {
    fn on_entity_added(&mut self, entity: Entity) {
        self.added.push(entity);
    }

    fn on_entity_removed(&mut self, entity: Entity) {
        self.removed.push(entity);
    }
}

impl System for Recorder {
    fn filter(&self) -> Filter {
        Filter::new().requires::<Health>()
    }
}

fn world_with_recorder() -> World {
    let mut world = World::new();
    world.add_system(Recorder::default()).unwrap();
    world
}

#[test]
fn test_kill_invalidates_every_copy() {
    let mut world = World::new();
    let e = world.create_entity();
    let copy = e;

    world.kill(e);
    assert!(world.is_valid(copy));
    world.refresh();

    assert!(!world.is_valid(e));
    assert!(!world.is_valid(copy));
    assert!(!world.has_component::<Health>(copy));
    assert!(!world.is_activated(copy));
}

#[test]
fn test_recycled_slot_gets_fresh_generation() {
    let mut world = World::new();
    let mut previous = Vec::new();

    let mut e = world.create_entity();
    for _ in 0..32 {
        world.kill(e);
        world.refresh();
        previous.push(e);

        e = world.create_entity();
        assert_eq!(e.index(), previous[0].index());
        assert!(previous.iter().all(|old| old.generation() != e.generation()));
        assert!(previous.iter().all(|&old| !world.is_valid(old)));
        assert!(world.is_valid(e));
    }
}

#[test]
fn test_double_activation_notifies_once() {
    let mut world = world_with_recorder();
    let e = world.create_entity();
    world.add_component(e, Health(3));

    world.activate(e);
    world.activate(e);
    let stats = world.refresh();

    assert_eq!(stats.activated, 1);
    assert_eq!(world.system_entities::<Recorder>().unwrap(), &[e]);
    assert_eq!(world.system::<Recorder>().unwrap().added, vec![e]);

    // Activating an already active entity is a no-op too.
    world.activate(e);
    world.refresh();
    assert_eq!(world.system::<Recorder>().unwrap().added.len(), 1);
}

#[test]
fn test_deactivate_then_kill_in_one_refresh() {
    let mut world = world_with_recorder();
    let e = world.create_entity();
    world.entity(e).add_component(Health(1)).add_component(Tag).activate();
    world.refresh();
    assert_eq!(world.system_entities::<Recorder>().unwrap().len(), 1);

    world.deactivate(e);
    world.kill(e);
    let stats = world.refresh();

    assert_eq!(stats, RefreshStats { activated: 0, deactivated: 1, killed: 1 });
    assert!(!world.is_valid(e));
    assert!(world.system_entities::<Recorder>().unwrap().is_empty());
    assert_eq!(world.system::<Recorder>().unwrap().removed, vec![e]);

    // The recycled slot starts with no components.
    let fresh = world.create_entity();
    assert_eq!(fresh.index(), e.index());
    assert!(world.component_type_list(fresh).is_empty());
}

#[test]
fn test_kill_without_deactivate_leaves_no_membership() {
    let mut world = world_with_recorder();
    let e = world.create_entity();
    world.add_component(e, Health(1));
    world.activate(e);
    world.refresh();

    world.kill(e);
    world.refresh();

    assert!(world.system_entities::<Recorder>().unwrap().is_empty());
    assert_eq!(world.system::<Recorder>().unwrap().removed, vec![e]);
}

#[test]
fn test_duplicate_kill_is_harmless() {
    let mut world = world_with_recorder();
    let e = world.create_entity();
    let other = world.create_entity();

    world.kill_entities(&[e, e]);
    let stats = world.refresh();

    assert_eq!(stats.killed, 1);
    assert!(world.is_valid(other));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn test_activation_and_kill_in_one_refresh() {
    let mut world = world_with_recorder();
    let e = world.create_entity();
    world.add_component(e, Health(1));

    world.activate(e);
    world.kill(e);
    world.refresh();

    let recorder = world.system::<Recorder>().unwrap();
    assert_eq!(recorder.added, vec![e]);
    assert_eq!(recorder.removed, vec![e]);
    assert!(world.system_entities::<Recorder>().unwrap().is_empty());
}

#[test]
fn test_queries_follow_refresh() {
    let mut world = World::new();
    let entities = world.create_entities(4);
    world.activate_entities(&entities[..2]);
    world.refresh();

    assert_eq!(world.entity_count(), 4);
    assert_eq!(world.entities().collect::<Vec<_>>(), entities);
    assert_eq!(world.activated_entities().collect::<Vec<_>>(), &entities[..2]);

    world.deactivate_entities(&entities[..1]);
    world.refresh();
    assert_eq!(world.activated_entities().collect::<Vec<_>>(), &entities[1..2]);
    assert_eq!(world.entity_at(entities[3].index()), Some(entities[3]));
}

#[test]
fn test_try_accessors_report_errors() {
    let mut world = World::new();
    let e = world.create_entity();

    assert!(matches!(
        world.try_get_component::<Health>(e),
        Err(EcsError::MissingComponent { .. })
    ));

    world.kill(e);
    world.refresh();
    assert!(matches!(
        world.try_add_component(e, Health(1)),
        Err(EcsError::InvalidEntity { .. })
    ));
    assert!(matches!(
        world.try_get_component_mut::<Health>(e),
        Err(EcsError::InvalidEntity { .. })
    ));
}

#[test]
fn test_clear_notifies_and_resets() {
    let mut world = world_with_recorder();
    let entities = world.create_entities(3);
    for &e in &entities {
        world.add_component(e, Health(0));
    }
    world.activate_entities(&entities);
    world.refresh();

    world.clear();

    assert_eq!(world.entity_count(), 0);
    assert!(!world.has_system::<Recorder>());
    assert!(entities.iter().all(|&e| !world.is_valid(e)));

    let e = world.create_entity();
    assert!(world.is_valid(e));
    assert!(!world.has_component::<Health>(e));
}

#[test]
fn test_world_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.toml");
    std::fs::write(&path, "entity_capacity = 8\nwarn_on_duplicate_component = false\n").unwrap();

    let config = WorldConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.entity_capacity, 8);

    let mut world = World::with_config(config);
    let entities = world.create_entities(20);
    assert_eq!(world.entity_count(), 20);
    assert!(entities.iter().all(|&e| world.is_valid(e)));
}

#[test]
#[should_panic(expected = "invalid entity handle")]
fn test_kill_through_stale_handle_panics() {
    let mut world = World::new();
    let e = world.create_entity();
    world.kill(e);
    world.refresh();
    world.kill(e);
}
