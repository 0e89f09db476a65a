use std::time::Duration;

use dungeon_radar_core::{
    Command, Event, Tile, TileMap, BULLET_LIFETIME, CONTACT_DAMAGE_RATE, MAX_HEALTH,
};
use dungeon_radar_system_combat::Combat;
use dungeon_radar_world::{self as world, query, World};
use glam::Vec2;

fn open_world(player: Vec2, enemies: &[Vec2]) -> World {
    let mut map = TileMap::filled(24, 24, Tile::Floor);
    map.enforce_border();
    let mut world = World::new(map);
    let mut events = Vec::new();
    world::apply(&mut world, Command::SpawnPlayer { position: player }, &mut events);
    for &position in enemies {
        world::apply(&mut world, Command::SpawnEnemy { position }, &mut events);
    }
    world
}

fn tick(world: &mut World, combat: &mut Combat, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);

    let mut commands = Vec::new();
    combat.handle(
        &events,
        &query::player(world),
        &query::enemy_view(world),
        &query::bullet_view(world),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn bullet_within_kill_radius_kills_exactly_once() {
    // Heading 0 fires along +y; a 250 ms tick carries the bullet 2 cells.
    let mut world = open_world(Vec2::new(5.5, 5.5), &[Vec2::new(5.5, 7.7)]);
    let mut combat = Combat::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::FireBullet, &mut events);

    let events = tick(&mut world, &mut combat, Duration::from_millis(250));

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { kills: 1, .. })));
    assert_eq!(query::kill_count(&world), 1);
    assert_eq!(query::remaining_enemies(&world), 0);
    assert!(query::bullet_view(&world).is_empty());

    let later = tick(&mut world, &mut combat, Duration::from_millis(250));
    assert!(!later
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { .. })));
    assert_eq!(query::kill_count(&world), 1);
}

#[test]
fn contact_drains_health_over_time() {
    let mut world = open_world(Vec2::new(10.5, 10.5), &[Vec2::new(10.5, 11.0)]);
    let mut combat = Combat::new();

    for _ in 0..8 {
        let _ = tick(&mut world, &mut combat, Duration::from_millis(250));
    }

    let health = query::player(&world).health;
    assert!((health - (MAX_HEALTH - CONTACT_DAMAGE_RATE * 2.0)).abs() < 1e-4);
}

#[test]
fn health_stops_at_zero_and_death_is_reported_once() {
    let mut world = open_world(Vec2::new(10.5, 10.5), &[Vec2::new(10.5, 11.0)]);
    let mut combat = Combat::new();
    let mut deaths = 0;

    // 100 health at 5 per second needs 20 seconds of contact.
    for _ in 0..100 {
        let events = tick(&mut world, &mut combat, Duration::from_millis(250));
        deaths += events
            .iter()
            .filter(|event| matches!(event, Event::PlayerDied))
            .count();
    }

    assert_eq!(query::player(&world).health, 0.0);
    assert_eq!(deaths, 1);
}

#[test]
fn bullets_expire_after_their_lifetime() {
    let mut world = open_world(Vec2::new(2.5, 2.5), &[]);
    let mut combat = Combat::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::FireBullet, &mut events);

    let steps = (BULLET_LIFETIME / 0.5) as usize;
    for step in 1..=steps {
        let events = tick(&mut world, &mut combat, Duration::from_millis(500));
        let expired = events
            .iter()
            .any(|event| matches!(event, Event::BulletExpired { .. }));
        assert_eq!(expired, step == steps, "unexpected expiry state at step {step}");
    }

    assert!(query::bullet_view(&world).is_empty());
}

#[test]
fn bullets_are_destroyed_by_walls() {
    let mut world = open_world(Vec2::new(5.5, 20.5), &[]);
    let mut combat = Combat::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::FireBullet, &mut events);

    let events = tick(&mut world, &mut combat, Duration::from_millis(500));

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BulletHitWall { .. })));
    assert!(query::bullet_view(&world).is_empty());
}
