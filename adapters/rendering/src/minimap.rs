//! Track-up radar panel drawn over the top-left corner of the view.
//!
//! Panel coordinates grow rightwards and downwards from the player at the
//! panel centre. The player's forward direction is always panel up.

use dungeon_radar_core::{
    rotate, BulletView, CellCoord, EnemyView, TileMap, MINIMAP_MARGIN, MINIMAP_RADIUS,
};
use glam::Vec2;

use crate::{Camera, Frame};

const WALL_GLYPH: char = '█';
const FLOOR_GLYPH: char = ' ';
const ENEMY_GLYPH: char = 'E';
const BULLET_GLYPH: char = '·';
const PLAYER_GLYPH: char = '▲';

/// Converts a world offset from the player into panel coordinates.
#[must_use]
pub fn to_panel(offset: Vec2, heading: f32) -> Vec2 {
    let turned = rotate(offset, heading);
    Vec2::new(turned.x, -turned.y)
}

/// Converts panel coordinates back into a world offset from the player.
#[must_use]
pub fn from_panel(panel: Vec2, heading: f32) -> Vec2 {
    rotate(Vec2::new(panel.x, -panel.y), -heading)
}

/// Frame cell at the centre of the panel, where the player arrow sits.
#[must_use]
pub const fn panel_center() -> (i32, i32) {
    let center = MINIMAP_MARGIN + MINIMAP_RADIUS;
    (center, center)
}

/// Draws terrain, enemies, bullets and the player arrow.
pub fn draw_minimap(
    frame: &mut Frame,
    map: &TileMap,
    camera: &Camera,
    enemies: &EnemyView,
    bullets: &BulletView,
) {
    let (center_column, center_row) = panel_center();

    for dy in -MINIMAP_RADIUS..=MINIMAP_RADIUS {
        for dx in -MINIMAP_RADIUS..=MINIMAP_RADIUS {
            let panel = Vec2::new(dx as f32, dy as f32);
            let sample = camera.position + from_panel(panel, camera.heading);
            let Some(cell) = CellCoord::containing(sample) else {
                continue;
            };
            if cell.column() >= map.columns() || cell.row() >= map.rows() {
                continue;
            }
            let glyph = if map.tile(cell).is_floor() {
                FLOOR_GLYPH
            } else {
                WALL_GLYPH
            };
            frame.set(center_column + dx, center_row + dy, glyph);
        }
    }

    for enemy in enemies.alive() {
        plot(frame, camera, enemy.position, ENEMY_GLYPH);
    }
    for bullet in bullets.iter() {
        plot(frame, camera, bullet.position, BULLET_GLYPH);
    }

    frame.set(center_column, center_row, PLAYER_GLYPH);
}

fn plot(frame: &mut Frame, camera: &Camera, position: Vec2, glyph: char) {
    let panel = to_panel(position - camera.position, camera.heading).round();
    let reach = MINIMAP_RADIUS as f32;
    if panel.x.abs() > reach || panel.y.abs() > reach {
        return;
    }
    let (center_column, center_row) = panel_center();
    frame.set(
        center_column + panel.x as i32,
        center_row + panel.y as i32,
        glyph,
    );
}
