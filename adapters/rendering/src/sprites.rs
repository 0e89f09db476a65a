//! Projection of enemies and bullets into the 3-D view.

use dungeon_radar_core::{
    wrap_angle, BulletView, EnemyView, TileMap, FIELD_OF_VIEW, RENDER_DEPTH, SIGHT_STEP,
};
use glam::Vec2;

use crate::{Camera, DepthBuffer, Frame};

const ENEMY_GLYPH: char = '⣿';
const BULLET_GLYPH: char = '·';
const NEGLIGIBLE_DISTANCE: f32 = 1e-6;

/// Reports whether every sample on the segment from `from` towards `to` is floor.
///
/// Samples are taken every [`SIGHT_STEP`] starting at `from` and stopping short
/// of `to`, so the target's own cell never blocks the view.
#[must_use]
pub fn line_of_sight(map: &TileMap, from: Vec2, to: Vec2) -> bool {
    let offset = to - from;
    let distance = offset.length();
    if distance <= NEGLIGIBLE_DISTANCE {
        return true;
    }

    let direction = offset / distance;
    let samples = (distance / SIGHT_STEP) as u32;
    (0..samples).all(|sample| {
        let point = from + direction * (sample as f32 * SIGHT_STEP);
        map.tile_at(point).is_floor()
    })
}

/// Screen column of a target, or `None` when it lies outside the field of view.
#[must_use]
pub fn project_column(camera: &Camera, target: Vec2, width: usize) -> Option<usize> {
    let offset = target - camera.position;
    let angle = wrap_angle(offset.x.atan2(offset.y) - camera.heading);
    let half_fov = FIELD_OF_VIEW / 2.0;
    if angle.abs() >= half_fov || width == 0 {
        return None;
    }

    let column = ((0.5 + angle / half_fov * 0.5) * width as f32) as usize;
    Some(column.min(width - 1))
}

/// Stamps every visible live enemy as a block scaled by inverse distance.
pub fn draw_enemies(
    frame: &mut Frame,
    map: &TileMap,
    camera: &Camera,
    enemies: &EnemyView,
    depth: &DepthBuffer,
) {
    for enemy in enemies.alive() {
        let distance = enemy.position.distance(camera.position);
        if distance <= NEGLIGIBLE_DISTANCE || distance >= RENDER_DEPTH {
            continue;
        }
        if !line_of_sight(map, camera.position, enemy.position) {
            continue;
        }
        let Some(column) = project_column(camera, enemy.position, frame.width()) else {
            continue;
        };
        if depth.get(column) < distance {
            continue;
        }
        stamp_enemy(frame, column as i32, distance, camera.bob);
    }
}

fn stamp_enemy(frame: &mut Frame, column: i32, distance: f32, bob: i32) {
    let size = ((frame.height() as f32 / distance) as i32).max(2);
    let half = size / 2;
    let center_row = frame.height() as i32 / 2 + bob;

    for block_row in 0..2 {
        for block_column in 0..2 {
            for dy in 0..half {
                for dx in 0..half {
                    frame.set(
                        column + block_column * half + dx - half,
                        center_row + block_row * half + dy - half,
                        ENEMY_GLYPH,
                    );
                }
            }
        }
    }
}

/// Draws each bullet as a single glyph on the horizon row when no wall is nearer.
pub fn draw_bullets(frame: &mut Frame, camera: &Camera, bullets: &BulletView, depth: &DepthBuffer) {
    let row = frame.height() as i32 / 2 + camera.bob;
    for bullet in bullets.iter() {
        let distance = bullet.position.distance(camera.position);
        if distance <= NEGLIGIBLE_DISTANCE || distance > RENDER_DEPTH {
            continue;
        }
        let Some(column) = project_column(camera, bullet.position, frame.width()) else {
            continue;
        };
        if distance < depth.get(column) {
            frame.set(column as i32, row, BULLET_GLYPH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_radar_core::{BulletId, BulletSnapshot, CellCoord, Tile};

    fn camera() -> Camera {
        Camera {
            position: Vec2::new(5.5, 2.5),
            heading: 0.0,
            bob: 0,
        }
    }

    fn bordered() -> TileMap {
        let mut map = TileMap::filled(12, 12, Tile::Floor);
        map.enforce_border();
        map
    }

    #[test]
    fn walls_on_the_segment_block_sight() {
        let mut map = bordered();
        let from = Vec2::new(5.5, 2.5);
        let to = Vec2::new(5.5, 8.5);
        assert!(line_of_sight(&map, from, to));

        map.set(CellCoord::new(5, 5), Tile::Wall);
        assert!(!line_of_sight(&map, from, to));
        assert!(line_of_sight(&map, from, Vec2::new(9.5, 2.5)));
    }

    #[test]
    fn targets_map_to_columns_across_the_view() {
        let camera = camera();
        assert_eq!(project_column(&camera, Vec2::new(5.5, 8.5), 100), Some(50));

        let right = project_column(&camera, Vec2::new(7.5, 8.5), 100);
        assert!(matches!(right, Some(column) if column > 50));
        let left = project_column(&camera, Vec2::new(3.5, 8.5), 100);
        assert!(matches!(left, Some(column) if column < 50));

        assert_eq!(project_column(&camera, Vec2::new(5.5, 1.0), 100), None);
        assert_eq!(project_column(&camera, Vec2::new(9.5, 2.5), 100), None);
    }

    #[test]
    fn heading_wraps_when_projecting() {
        let camera = Camera {
            position: Vec2::ZERO,
            heading: std::f32::consts::PI - 0.1,
            bob: 0,
        };
        // Target sits just past the -π/π seam relative to the heading.
        let target = Vec2::new(-(0.05f32).sin(), -(0.05f32).cos()) * 4.0;
        assert!(project_column(&camera, target, 100).is_some());
    }

    #[test]
    fn bullets_hide_behind_nearer_walls() {
        let bullets = BulletView::from_snapshots(vec![BulletSnapshot {
            id: BulletId::new(0),
            position: Vec2::new(5.5, 6.5),
            heading: 0.0,
            lifetime: 1.0,
        }]);

        let mut open = Frame::blank(100, 32);
        draw_bullets(&mut open, &camera(), &bullets, &DepthBuffer::cleared(100));
        assert_eq!(open.get(50, 16), Some(BULLET_GLYPH));

        let mut walled = Frame::blank(100, 32);
        let near = DepthBuffer::from_distances(vec![2.0; 100]);
        draw_bullets(&mut walled, &camera(), &bullets, &near);
        assert_eq!(walled.count(BULLET_GLYPH), 0);
    }
}
