use std::collections::{HashSet, VecDeque};

use dungeon_radar_core::{CellCoord, Tile, TileMap, MAP_COLUMNS, MAP_ROWS};
use dungeon_radar_system_map_generation::{Config, MapGeneration};

const SEEDS: [u64; 6] = [0, 1, 7, 42, 0x5eed_cafe, u64::MAX];

#[test]
fn border_cells_are_always_walls() {
    for seed in SEEDS {
        let generated = MapGeneration::new(Config::standard(seed)).generate();
        let map = generated.map();
        assert_eq!(map.columns(), MAP_COLUMNS);
        assert_eq!(map.rows(), MAP_ROWS);

        for (cell, tile) in map.cells() {
            let on_border = cell.column() == 0
                || cell.row() == 0
                || cell.column() == MAP_COLUMNS - 1
                || cell.row() == MAP_ROWS - 1;
            if on_border {
                assert_eq!(tile, Tile::Wall, "seed {seed}: border cell {cell:?} open");
            }
        }
    }
}

#[test]
fn accepted_rooms_are_carved_to_floor() {
    for seed in SEEDS {
        let generated = MapGeneration::new(Config::standard(seed)).generate();
        assert!(!generated.rooms().is_empty(), "seed {seed}: no rooms accepted");

        for room in generated.rooms() {
            for cell in room.cells() {
                assert_eq!(
                    generated.map().tile(cell),
                    Tile::Floor,
                    "seed {seed}: room {room:?} cell {cell:?} not carved"
                );
            }
        }
    }
}

#[test]
fn room_count_never_exceeds_attempts() {
    for seed in SEEDS {
        let generated = MapGeneration::new(Config::new(40, 30, 5, 4, 6, seed)).generate();
        assert!(generated.rooms().len() <= 5);
    }
}

#[test]
fn every_room_is_reachable_from_the_first() {
    for seed in SEEDS {
        let generated = MapGeneration::new(Config::standard(seed)).generate();
        let rooms = generated.rooms();
        let reachable = flood_fill(generated.map(), rooms[0].center());

        for room in rooms {
            assert!(
                reachable.contains(&room.center()),
                "seed {seed}: room {room:?} is disconnected"
            );
        }
    }
}

#[test]
fn generation_is_deterministic_for_same_seed() {
    let first = MapGeneration::new(Config::standard(99)).generate();
    let second = MapGeneration::new(Config::standard(99)).generate();

    assert_eq!(first.map(), second.map());
    assert_eq!(first.rooms(), second.rooms());
}

#[test]
fn different_seeds_produce_different_layouts() {
    let first = MapGeneration::new(Config::standard(1)).generate();
    let second = MapGeneration::new(Config::standard(2)).generate();

    assert_ne!(first.map(), second.map());
}

fn flood_fill(map: &TileMap, start: CellCoord) -> HashSet<CellCoord> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([start]);
    let _ = seen.insert(start);

    while let Some(cell) = queue.pop_front() {
        let (column, row) = (cell.column(), cell.row());
        let neighbours = [
            (column.wrapping_sub(1), row),
            (column + 1, row),
            (column, row.wrapping_sub(1)),
            (column, row + 1),
        ];
        for (column, row) in neighbours {
            let next = CellCoord::new(column, row);
            if map.tile(next) == Tile::Floor && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    seen
}
