#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that steers live enemies straight at the player.
//!
//! Enemies have no pathfinding. Each tick an enemy inside the pursuit band
//! proposes one step along the line to the player; the world refuses the step
//! when it would end inside a wall, leaving the enemy where it was.

use dungeon_radar_core::{
    elapsed, Command, EnemyView, Event, PlayerSnapshot, ENEMY_DETECTION_RADIUS, ENEMY_SPEED,
    ENEMY_STANDOFF,
};

/// Enemy pursuit system that queues one step per chasing enemy.
#[derive(Debug, Default)]
pub struct Pursuit {
    scratch: Vec<Command>,
}

impl Pursuit {
    /// Creates a new pursuit system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::StepEnemy` entries for enemies within the pursuit band.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let seconds = elapsed(events).as_secs_f32();
        if seconds <= 0.0 {
            return;
        }

        self.scratch.clear();
        for enemy in enemies.alive() {
            let offset = player.position - enemy.position;
            let distance = offset.length();
            if distance <= ENEMY_STANDOFF || distance >= ENEMY_DETECTION_RADIUS {
                continue;
            }
            self.scratch.push(Command::StepEnemy {
                enemy: enemy.id,
                delta: offset / distance * ENEMY_SPEED * seconds,
            });
        }

        out.append(&mut self.scratch);
    }
}
