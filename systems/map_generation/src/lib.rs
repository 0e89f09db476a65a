#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural dungeon generator that carves rooms and corridors into a wall grid.
//!
//! Rooms are proposed at random and kept only when they stay clear of every
//! room accepted before them. A proposal that collides is dropped without a
//! retry, so the number of rooms is probabilistic. Each accepted room is then
//! joined to the room accepted just before it by an L-shaped corridor, which
//! keeps the dungeon connected without building a spanning tree.

use dungeon_radar_core::{
    CellCoord, CellRect, CellRectSize, Tile, TileMap, MAP_COLUMNS, MAP_ROWS, ROOM_ATTEMPTS,
    ROOM_MAX_SIZE, ROOM_MIN_SIZE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    columns: u32,
    rows: u32,
    room_attempts: u32,
    room_min_size: u32,
    room_max_size: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from explicit dimensions and room parameters.
    #[must_use]
    pub const fn new(
        columns: u32,
        rows: u32,
        room_attempts: u32,
        room_min_size: u32,
        room_max_size: u32,
        rng_seed: u64,
    ) -> Self {
        Self {
            columns,
            rows,
            room_attempts,
            room_min_size,
            room_max_size,
            rng_seed,
        }
    }

    /// Configuration of the standard session dungeon for the provided seed.
    #[must_use]
    pub const fn standard(rng_seed: u64) -> Self {
        Self::new(
            MAP_COLUMNS,
            MAP_ROWS,
            ROOM_ATTEMPTS,
            ROOM_MIN_SIZE,
            ROOM_MAX_SIZE,
            rng_seed,
        )
    }
}

/// Result of a generation pass.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    map: TileMap,
    rooms: Vec<CellRect>,
}

impl GeneratedMap {
    /// Finished tile grid.
    #[must_use]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Rooms accepted during generation, in acceptance order.
    #[must_use]
    pub fn rooms(&self) -> &[CellRect] {
        &self.rooms
    }

    /// Consumes the result, keeping only the tile grid.
    #[must_use]
    pub fn into_map(self) -> TileMap {
        self.map
    }
}

/// Seeded room-and-corridor dungeon generator.
#[derive(Debug)]
pub struct MapGeneration {
    config: Config,
    rng: ChaCha8Rng,
}

impl MapGeneration {
    /// Creates a new generator using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Produces a finished dungeon.
    pub fn generate(&mut self) -> GeneratedMap {
        let mut map = TileMap::filled(self.config.columns, self.config.rows, Tile::Wall);
        let mut rooms: Vec<CellRect> = Vec::new();

        for _ in 0..self.config.room_attempts {
            let Some(room) = self.propose_room() else {
                continue;
            };
            if rooms.iter().any(|accepted| crowds(&room, accepted)) {
                continue;
            }
            carve(&mut map, room.cells());
            rooms.push(room);
        }

        for pair in rooms.windows(2) {
            self.carve_corridor(&mut map, pair[0].center(), pair[1].center());
        }

        map.enforce_border();
        tracing::debug!(
            columns = self.config.columns,
            rows = self.config.rows,
            attempts = self.config.room_attempts,
            rooms = rooms.len(),
            "dungeon generated"
        );

        GeneratedMap { map, rooms }
    }

    fn propose_room(&mut self) -> Option<CellRect> {
        let smallest = self.config.room_min_size.max(1);
        let largest = self.config.room_max_size.max(smallest);
        let width = self.rng.gen_range(smallest..=largest);
        let height = self.rng.gen_range(smallest..=largest);

        let last_column = self.config.columns.checked_sub(width + 2)?;
        let last_row = self.config.rows.checked_sub(height + 2)?;
        if last_column < 1 || last_row < 1 {
            return None;
        }

        let column = self.rng.gen_range(1..=last_column);
        let row = self.rng.gen_range(1..=last_row);
        Some(CellRect::from_origin_and_size(
            CellCoord::new(column, row),
            CellRectSize::new(width, height),
        ))
    }

    fn carve_corridor(&mut self, map: &mut TileMap, from: CellCoord, to: CellCoord) {
        if self.rng.gen_bool(0.5) {
            carve(map, horizontal(from.row(), from.column(), to.column()));
            carve(map, vertical(to.column(), from.row(), to.row()));
        } else {
            carve(map, vertical(from.column(), from.row(), to.row()));
            carve(map, horizontal(to.row(), from.column(), to.column()));
        }
    }
}

/// Reports whether two rooms touch once `existing` is grown by a one-cell margin.
fn crowds(candidate: &CellRect, existing: &CellRect) -> bool {
    let left = i64::from(candidate.origin().column());
    let top = i64::from(candidate.origin().row());
    let right = i64::from(candidate.right());
    let bottom = i64::from(candidate.bottom());

    let separated = right + 1 < i64::from(existing.origin().column())
        || left - 1 > i64::from(existing.right())
        || bottom + 1 < i64::from(existing.origin().row())
        || top - 1 > i64::from(existing.bottom());
    !separated
}

fn carve(map: &mut TileMap, cells: impl Iterator<Item = CellCoord>) {
    for cell in cells {
        map.set(cell, Tile::Floor);
    }
}

fn horizontal(row: u32, from: u32, to: u32) -> impl Iterator<Item = CellCoord> {
    (from.min(to)..=from.max(to)).map(move |column| CellCoord::new(column, row))
}

fn vertical(column: u32, from: u32, to: u32) -> impl Iterator<Item = CellCoord> {
    (from.min(to)..=from.max(to)).map(move |row| CellCoord::new(column, row))
}
