#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves bullet hits and enemy contact damage.
//!
//! Combat runs once per tick after every entity has moved. An enemy touched by
//! a bullet dies and consumes that bullet; an enemy that survives the bullet
//! check and stands within touch range of the player drains health for the
//! elapsed time. Each bullet is claimed by at most one enemy per tick.

use dungeon_radar_core::{
    elapsed, BulletId, BulletView, Command, EnemyView, Event, PlayerSnapshot,
    CONTACT_DAMAGE_RATE, KILL_RADIUS, TOUCH_RADIUS,
};

/// Combat system that queues hit resolution and damage commands.
#[derive(Debug, Default)]
pub struct Combat {
    claimed: Vec<BulletId>,
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::ResolveHit` and `Command::DamagePlayer` entries for the tick.
    ///
    /// Nothing is emitted unless `events` contains a time advance, so a frame
    /// that did not tick never resolves combat twice.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        bullets: &BulletView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }
        if player.health <= 0.0 {
            return;
        }

        let seconds = elapsed(events).as_secs_f32();
        self.claimed.clear();
        self.scratch.clear();

        for enemy in enemies.alive() {
            let hit = bullets.iter().find(|bullet| {
                !self.claimed.contains(&bullet.id)
                    && bullet.position.distance(enemy.position) < KILL_RADIUS
            });
            if let Some(bullet) = hit {
                self.claimed.push(bullet.id);
                self.scratch.push(Command::ResolveHit {
                    enemy: enemy.id,
                    bullet: bullet.id,
                });
                continue;
            }

            if enemy.position.distance(player.position) < TOUCH_RADIUS && seconds > 0.0 {
                self.scratch.push(Command::DamagePlayer {
                    amount: CONTACT_DAMAGE_RATE * seconds,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
