#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Dungeon Radar.
//!
//! The world owns the dungeon map and every entity. It only changes through
//! [`apply`], which validates each [`Command`] against the map and reports the
//! outcome as [`Event`] values. Moves that would end inside a wall are refused
//! here, so no caller can place an entity on a wall tile.

use dungeon_radar_core::{
    heading_vector, wrap_angle, BulletId, Command, EnemyId, Event, TileMap, BOB_DAMPING,
    BOB_SPEED, BULLET_LIFETIME, BULLET_SPEED, FALLBACK_SPAWN, MAX_HEALTH, MOVE_SPEED, RAY_STEP,
    RECOVERY_RADIUS, TURN_SPEED,
};
use glam::Vec2;

/// Represents the authoritative Dungeon Radar world state.
#[derive(Debug)]
pub struct World {
    map: TileMap,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    next_bullet: u32,
    kills: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world around a finished dungeon map.
    ///
    /// The player waits at the fallback spawn until a
    /// [`Command::SpawnPlayer`] places it.
    #[must_use]
    pub fn new(map: TileMap) -> Self {
        Self {
            map,
            player: Player::at(FALLBACK_SPAWN),
            enemies: Vec::new(),
            bullets: Vec::new(),
            next_bullet: 0,
            kills: 0,
            tick_index: 0,
        }
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|candidate| candidate.id == enemy)
    }

    fn bullet_mut(&mut self, bullet: BulletId) -> Option<&mut Bullet> {
        self.bullets.iter_mut().find(|candidate| candidate.id == bullet)
    }

    fn advance_bullets(&mut self, seconds: f32, out_events: &mut Vec<Event>) {
        self.bullets.retain(Bullet::is_alive);

        for bullet in &mut self.bullets {
            let flight = seconds.min(bullet.lifetime);
            let path = sweep(
                &self.map,
                bullet.position,
                heading_vector(bullet.heading),
                BULLET_SPEED * flight,
            );
            bullet.position = path.reached;
            bullet.lifetime -= seconds;
            if path.hit_wall {
                bullet.lifetime = 0.0;
                out_events.push(Event::BulletHitWall { bullet: bullet.id });
            } else if bullet.lifetime <= 0.0 {
                bullet.lifetime = 0.0;
                out_events.push(Event::BulletExpired { bullet: bullet.id });
            }
        }
    }
}

/// Outcome of sweeping a point along a straight segment.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Sweep {
    /// Last sampled position that was still on floor.
    reached: Vec2,
    hit_wall: bool,
}

/// Marches from `from` along `direction` in `RAY_STEP` increments, stopping
/// at the first sample that is not floor.
fn sweep(map: &TileMap, from: Vec2, direction: Vec2, distance: f32) -> Sweep {
    let steps = (distance / RAY_STEP).ceil().max(1.0) as u32;
    let mut reached = from;
    for step in 1..=steps {
        let sample = from + direction * (distance * step as f32 / steps as f32);
        if !map.tile_at(sample).is_floor() {
            return Sweep {
                reached,
                hit_wall: true,
            };
        }
        reached = sample;
    }
    Sweep {
        reached,
        hit_wall: false,
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SpawnPlayer { position } => {
            world.player = Player::at(position);
            out_events.push(Event::PlayerSpawned { position });
        }
        Command::SpawnEnemy { position } => {
            let enemy = EnemyId::new(world.enemies.len() as u32);
            world.enemies.push(Enemy {
                id: enemy,
                position,
                alive: true,
            });
            out_events.push(Event::EnemySpawned { enemy, position });
        }
        Command::RecoverPlayer => {
            let from = world.player.position;
            if world.map.tile_at(from).is_floor() {
                return;
            }
            let to = world.map.nearest_open(from, RECOVERY_RADIUS);
            if to != from {
                world.player.position = to;
                out_events.push(Event::PlayerRecovered { from, to });
            }
        }
        Command::TurnPlayer { turn, dt } => {
            let delta = turn.sign() * TURN_SPEED * dt.as_secs_f32();
            world.player.heading = wrap_angle(world.player.heading + delta);
            out_events.push(Event::PlayerTurned {
                heading: world.player.heading,
            });
        }
        Command::AdvancePlayer { dt } => {
            let from = world.player.position;
            let to = from + heading_vector(world.player.heading) * MOVE_SPEED * dt.as_secs_f32();
            if world.map.tile_at(to).is_floor() {
                world.player.position = to;
                world.player.walked = true;
                out_events.push(Event::PlayerMoved { from, to });
            } else {
                out_events.push(Event::PlayerBlocked);
            }
        }
        Command::FireBullet => {
            let bullet = BulletId::new(world.next_bullet);
            world.next_bullet = world.next_bullet.wrapping_add(1);
            let position = world.player.position;
            let heading = world.player.heading;
            world.bullets.push(Bullet {
                id: bullet,
                position,
                heading,
                lifetime: BULLET_LIFETIME,
            });
            out_events.push(Event::BulletFired {
                bullet,
                position,
                heading,
            });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            let seconds = dt.as_secs_f32();
            world.player.update_bob(seconds);
            world.advance_bullets(seconds, out_events);
        }
        Command::StepEnemy { enemy, delta } => {
            let map = &world.map;
            let Some(target) = world
                .enemies
                .iter_mut()
                .find(|candidate| candidate.id == enemy && candidate.alive)
            else {
                return;
            };
            let from = target.position;
            let to = from + delta;
            if map.tile_at(to).is_floor() {
                target.position = to;
                out_events.push(Event::EnemyMoved { enemy, from, to });
            } else {
                out_events.push(Event::EnemyBlocked { enemy });
            }
        }
        Command::ResolveHit { enemy, bullet } => {
            let enemy_alive = world.enemy_mut(enemy).map_or(false, |target| target.alive);
            let bullet_alive = world.bullet_mut(bullet).map_or(false, |shot| shot.is_alive());
            if !(enemy_alive && bullet_alive) {
                return;
            }
            if let Some(target) = world.enemy_mut(enemy) {
                target.alive = false;
            }
            if let Some(shot) = world.bullet_mut(bullet) {
                shot.lifetime = 0.0;
            }
            world.kills = world.kills.saturating_add(1);
            out_events.push(Event::EnemyKilled {
                enemy,
                bullet,
                kills: world.kills,
            });
        }
        Command::DamagePlayer { amount } => {
            let before = world.player.health;
            if before <= 0.0 || amount <= 0.0 {
                return;
            }
            world.player.health = (before - amount).max(0.0);
            out_events.push(Event::PlayerDamaged {
                amount: before - world.player.health,
                health: world.player.health,
            });
            if world.player.health <= 0.0 {
                out_events.push(Event::PlayerDied);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use dungeon_radar_core::{
        BulletSnapshot, BulletView, EnemySnapshot, EnemyView, PlayerSnapshot, TileMap,
    };

    use super::World;

    /// Provides read-only access to the dungeon map.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.map
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            heading: world.player.heading,
            health: world.player.health,
            bob_phase: world.player.bob_phase,
        }
    }

    /// Captures a read-only view of every enemy, dead ones included.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                    alive: enemy.alive,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the bullets still in flight.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        BulletView::from_snapshots(
            world
                .bullets
                .iter()
                .filter(|bullet| bullet.is_alive())
                .map(|bullet| BulletSnapshot {
                    id: bullet.id,
                    position: bullet.position,
                    heading: bullet.heading,
                    lifetime: bullet.lifetime,
                })
                .collect(),
        )
    }

    /// Number of enemies killed so far.
    #[must_use]
    pub fn kill_count(world: &World) -> u32 {
        world.kills
    }

    /// Number of enemies still alive.
    #[must_use]
    pub fn remaining_enemies(world: &World) -> usize {
        world.enemies.iter().filter(|enemy| enemy.alive).count()
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[derive(Clone, Debug)]
struct Player {
    position: Vec2,
    heading: f32,
    health: f32,
    bob_phase: f32,
    walked: bool,
}

impl Player {
    fn at(position: Vec2) -> Self {
        Self {
            position,
            heading: 0.0,
            health: MAX_HEALTH,
            bob_phase: 0.0,
            walked: false,
        }
    }

    fn update_bob(&mut self, seconds: f32) {
        if self.walked {
            self.bob_phase += seconds * BOB_SPEED;
        } else {
            self.bob_phase *= BOB_DAMPING;
        }
        self.walked = false;
    }
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    id: EnemyId,
    position: Vec2,
    alive: bool,
}

#[derive(Clone, Copy, Debug)]
struct Bullet {
    id: BulletId,
    position: Vec2,
    heading: f32,
    lifetime: f32,
}

impl Bullet {
    fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}
