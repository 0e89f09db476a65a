#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting player and enemy spawn commands.
//!
//! Every spawn lands on an open cell: a floor cell whose eight neighbours are
//! floor as well, so nothing starts pressed against a wall.

use dungeon_radar_core::{
    CellCoord, Command, TileMap, ENEMY_COUNT, ENEMY_MIN_SPAWN_DISTANCE, FALLBACK_SPAWN,
};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ATTEMPTS_PER_ENEMY: u32 = 1_000;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    enemy_count: usize,
    min_enemy_distance: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided enemy count, spacing, and seed.
    #[must_use]
    pub const fn new(enemy_count: usize, min_enemy_distance: f32, rng_seed: u64) -> Self {
        Self {
            enemy_count,
            min_enemy_distance,
            rng_seed,
        }
    }

    /// Configuration of a standard session for the provided seed.
    #[must_use]
    pub const fn standard(rng_seed: u64) -> Self {
        Self::new(ENEMY_COUNT, ENEMY_MIN_SPAWN_DISTANCE, rng_seed)
    }
}

/// Pure system that places the player and the enemy roster.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits one player spawn followed by the enemy spawns for the provided map.
    pub fn handle(&mut self, map: &TileMap, out: &mut Vec<Command>) {
        let player = player_spawn(map);
        out.push(Command::SpawnPlayer { position: player });

        let enemies = self.enemy_positions(map, player);
        if enemies.len() < self.config.enemy_count {
            tracing::warn!(
                requested = self.config.enemy_count,
                placed = enemies.len(),
                "not enough open floor for every enemy"
            );
        }
        out.extend(
            enemies
                .into_iter()
                .map(|position| Command::SpawnEnemy { position }),
        );
    }

    fn enemy_positions(&mut self, map: &TileMap, player: Vec2) -> Vec<Vec2> {
        let mut positions = Vec::with_capacity(self.config.enemy_count);
        if map.columns() < 4 || map.rows() < 4 {
            return positions;
        }

        let max_x = (map.columns() - 2) as f32;
        let max_y = (map.rows() - 2) as f32;
        let budget = ATTEMPTS_PER_ENEMY.saturating_mul(self.config.enemy_count as u32);
        for _ in 0..budget {
            if positions.len() >= self.config.enemy_count {
                break;
            }
            let candidate = Vec2::new(
                self.rng.gen_range(1.0..max_x),
                self.rng.gen_range(1.0..max_y),
            );
            if map.tile_at(candidate).is_floor()
                && candidate.distance(player) > self.config.min_enemy_distance
                && map.is_open(candidate, 1)
            {
                positions.push(candidate);
            }
        }
        positions
    }
}

/// Open cell closest to the middle of the map, as a world position.
///
/// Ties keep the first cell in row-major order. Maps without any open cell
/// fall back to [`FALLBACK_SPAWN`].
#[must_use]
pub fn player_spawn(map: &TileMap) -> Vec2 {
    let middle = Vec2::new(map.columns() as f32 / 2.0, map.rows() as f32 / 2.0);
    let mut best: Option<(f32, CellCoord)> = None;

    for row in 1..map.rows().saturating_sub(1) {
        for column in 1..map.columns().saturating_sub(1) {
            let cell = CellCoord::new(column, row);
            let center = cell.center();
            if !map.is_open(center, 1) {
                continue;
            }
            let distance = Vec2::new(column as f32, row as f32).distance_squared(middle);
            if best.map_or(true, |(closest, _)| distance < closest) {
                best = Some((distance, cell));
            }
        }
    }

    best.map_or(FALLBACK_SPAWN, |(_, cell)| cell.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_the_first_cell_in_row_order() {
        let map = TileMap::from_ascii(&[
            "#########", //
            "#.......#", //
            "#.......#", //
            "#.......#", //
            "#########", //
        ]);
        // Middle is (4.5, 2.5); cells (4, 2) and (5, 2) are equally close.
        assert_eq!(player_spawn(&map), Vec2::new(4.5, 2.5));
    }

    #[test]
    fn tiny_maps_spawn_no_enemies() {
        let map = TileMap::from_ascii(&["###", "#.#", "###"]);
        let mut spawning = Spawning::new(Config::standard(3));
        assert!(spawning.enemy_positions(&map, Vec2::splat(1.5)).is_empty());
    }
}
