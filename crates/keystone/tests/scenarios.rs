//! End-to-end scenarios: systems driven over a refreshed world.

use keystone::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
}
impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
    z: f32,
}
impl Component for Velocity {}

struct Player;
impl Component for Player {}

struct Npc;
impl Component for Npc {}

struct Sprite;
impl Component for Sprite {}

struct Mesh;
impl Component for Mesh {}

// ============================================================================
// SYSTEMS
// ============================================================================

struct Movement;

impl EntityObserver for Movement {}

impl System for Movement {
    fn filter(&self) -> Filter {
        Filter::new().requires::<(Position, Velocity)>()
    }
}

impl Movement {
    fn update(&mut self, mut ctx: SystemContext<'_>) {
        for &e in ctx.entities() {
            let v = *ctx.get::<Velocity>(e);
            let p = ctx.get_mut::<Position>(e);
            p.x += v.x;
            p.y += v.y;
            p.z += v.z;
        }
    }
}

/// Matches every activated entity.
struct Census;

impl EntityObserver for Census {}

impl System for Census {
    fn filter(&self) -> Filter {
        Filter::all()
    }
}

#[derive(Default)]
struct PlayerInput {
    joined: usize,
    left: usize,
}

impl EntityObserver for PlayerInput {
    fn on_entity_added(&mut self, _entity: Entity) {
        self.joined += 1;
    }

    fn on_entity_removed(&mut self, _entity: Entity) {
        self.left += 1;
    }
}

impl System for PlayerInput {
    fn filter(&self) -> Filter {
        Filter::new().requires::<Player>().excludes::<Npc>()
    }
}

/// Anything drawable.
struct Render;

impl EntityObserver for Render {}

impl System for Render {
    fn filter(&self) -> Filter {
        Filter::new().requires_one_of::<(Sprite, Mesh)>()
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_movement_registered_after_refresh() {
    let mut world = World::new();
    let e = world.create_entity();
    world.add_component(e, Position { x: 0.0, y: 0.0, z: 0.0 });
    world.add_component(e, Velocity { x: 1.0, y: 2.0, z: 3.0 });
    world.activate(e);
    world.refresh();

    world.add_system(Movement).unwrap();
    assert_eq!(world.system_entities::<Movement>().unwrap(), &[e]);

    world
        .run_system::<Movement, _>(|movement, ctx| movement.update(ctx))
        .unwrap();

    assert_eq!(
        *world.get_component::<Position>(e),
        Position { x: 1.0, y: 2.0, z: 3.0 }
    );
}

#[test]
fn test_empty_filter_lists_activated_only() {
    let mut world = World::new();
    let entities = world.create_entities(3);
    world.activate(entities[0]);
    world.activate(entities[2]);
    world.refresh();

    world.add_system(Census).unwrap();
    assert_eq!(
        world.system_entities::<Census>().unwrap(),
        &[entities[0], entities[2]]
    );
}

#[test]
fn test_player_excludes_npc() {
    let mut world = World::new();
    world.add_system(PlayerInput::default()).unwrap();

    let e = world.create_entity();
    world.add_component(e, Player);
    world.activate(e);
    world.refresh();
    assert_eq!(world.system_entities::<PlayerInput>().unwrap(), &[e]);

    world.add_component(e, Npc);
    // Membership only changes at refresh.
    assert_eq!(world.system_entities::<PlayerInput>().unwrap(), &[e]);
    world.refresh();
    assert!(world.system_entities::<PlayerInput>().unwrap().is_empty());

    let input = world.system::<PlayerInput>().unwrap();
    assert_eq!((input.joined, input.left), (1, 1));
}

#[test]
fn test_requires_one_of() {
    let mut world = World::new();
    world.add_system(Render).unwrap();

    let sprite = world.create_entity();
    let mesh = world.create_entity();
    let both = world.create_entity();
    let neither = world.create_entity();
    world.add_component(sprite, Sprite);
    world.add_component(mesh, Mesh);
    world.entity(both).add_component(Sprite).add_component(Mesh);
    world.add_component(neither, Position { x: 0.0, y: 0.0, z: 0.0 });
    world.activate_entities(&[sprite, mesh, both, neither]);
    world.refresh();

    assert_eq!(
        world.system_entities::<Render>().unwrap(),
        &[sprite, mesh, both]
    );
}

#[test]
fn test_component_removal_drops_membership() {
    let mut world = World::new();
    world.add_system(Movement).unwrap();

    let e = world.create_entity();
    world
        .entity(e)
        .add_component(Position { x: 0.0, y: 0.0, z: 0.0 })
        .add_component(Velocity { x: 1.0, y: 0.0, z: 0.0 })
        .activate();
    world.refresh();
    assert_eq!(world.system_entities::<Movement>().unwrap().len(), 1);

    let removed = world.remove_component::<Velocity>(e);
    assert_eq!(removed, Some(Velocity { x: 1.0, y: 0.0, z: 0.0 }));
    world.refresh();
    assert!(world.system_entities::<Movement>().unwrap().is_empty());
    assert!(world.is_activated(e));
}

#[test]
fn test_first_component_wins() {
    let mut world = World::new();
    let e = world.create_entity();
    world.add_component(e, Velocity { x: 1.0, y: 1.0, z: 1.0 });
    world.add_component(e, Velocity { x: 9.0, y: 9.0, z: 9.0 });

    assert_eq!(
        *world.get_component::<Velocity>(e),
        Velocity { x: 1.0, y: 1.0, z: 1.0 }
    );
    assert_eq!(world.component_type_list(e).len(), 1);
}

#[test]
fn test_duplicate_system_rejected() {
    let mut world = World::new();
    world.add_system(Census).unwrap();

    let err = world.add_system(Census).unwrap_err();
    assert!(matches!(err, EcsError::SystemAlreadyRegistered { .. }));
    assert_eq!(world.system_count(), 1);

    assert!(world.remove_system::<Census>().is_some());
    assert!(!world.has_system::<Census>());
    assert!(world.run_system::<Census, _>(|_, _| ()).is_none());
}

#[test]
fn test_systems_queue_structural_changes() {
    let mut world = World::new();
    world.add_system(Census).unwrap();
    let entities = world.create_entities(5);
    world.activate_entities(&entities);
    world.refresh();

    // Deactivate every other member from inside the system pass.
    world.run_system::<Census, _>(|_, mut ctx| {
        for (i, &e) in ctx.entities().iter().enumerate() {
            if i % 2 == 0 {
                ctx.deactivate(e);
            }
        }
        assert_eq!(ctx.entities().len(), 5);
    });
    world.refresh();

    assert_eq!(
        world.system_entities::<Census>().unwrap(),
        &[entities[1], entities[3]]
    );
}

#[test]
fn test_system_added_components_are_refiltered() {
    let mut world = World::new();
    world.add_system(Census).unwrap();
    world.add_system(Movement).unwrap();

    let e = world.create_entity();
    world.add_component(e, Position { x: 0.0, y: 0.0, z: 0.0 });
    world.activate(e);
    world.refresh();
    assert!(world.system_entities::<Movement>().unwrap().is_empty());

    world.run_system::<Census, _>(|_, mut ctx| {
        for &e in ctx.entities() {
            ctx.add_component(e, Velocity { x: 0.5, y: 0.0, z: 0.0 });
        }
    });
    world.refresh();

    assert_eq!(world.system_entities::<Movement>().unwrap(), &[e]);
}

#[test]
fn test_system_pass_removal_drops_membership() {
    let mut world = World::new();
    world.add_system(Movement).unwrap();

    let entities = world.create_entities(2);
    for &e in &entities {
        world.add_component(e, Position { x: 0.0, y: 0.0, z: 0.0 });
        world.add_component(e, Velocity { x: 1.0, y: 0.0, z: 0.0 });
    }
    world.activate_entities(&entities);
    world.refresh();

    let taken = world
        .run_system::<Movement, _>(|_, mut ctx| {
            let first = ctx.entities()[0];
            let taken = ctx.remove_component::<Velocity>(first);
            assert!(!ctx.has::<Velocity>(first));
            assert!(ctx.remove_component::<Velocity>(first).is_none());
            taken
        })
        .unwrap();
    assert_eq!(taken, Some(Velocity { x: 1.0, y: 0.0, z: 0.0 }));

    // Still listed until the refresh commits the change.
    assert_eq!(world.system_entities::<Movement>().unwrap().len(), 2);
    world.refresh();
    assert_eq!(world.system_entities::<Movement>().unwrap(), &[entities[1]]);
}

#[test]
fn test_system_pass_try_get() {
    let mut world = World::new();
    world.add_system(Census).unwrap();

    let e = world.create_entity();
    world.add_component(e, Position { x: 4.0, y: 0.0, z: 0.0 });
    world.activate(e);
    let gone = world.create_entity();
    world.kill(gone);
    world.refresh();

    world.run_system::<Census, _>(|_, ctx| {
        assert_eq!(ctx.try_get::<Position>(e).map(|p| p.x).ok(), Some(4.0));
        assert!(matches!(
            ctx.try_get::<Velocity>(e),
            Err(EcsError::MissingComponent { .. })
        ));
        assert!(matches!(
            ctx.try_get::<Position>(gone),
            Err(EcsError::InvalidEntity { .. })
        ));
    });
}

#[test]
fn test_remove_all_systems_keeps_entities() {
    let mut world = World::new();
    world.add_system(Census).unwrap();
    world.add_system(Movement).unwrap();
    let e = world.create_entity();
    world.activate(e);
    world.refresh();

    world.remove_all_systems();

    assert_eq!(world.system_count(), 0);
    assert!(!world.has_system::<Census>());
    assert!(!world.has_system::<Movement>());
    assert!(world.is_activated(e));

    // A fresh registration sees the still-activated entity.
    world.add_system(Census).unwrap();
    assert_eq!(world.system_entities::<Census>().unwrap(), &[e]);
}
