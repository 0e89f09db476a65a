//! Column raycaster that draws the wall slabs and floor gradient.

use dungeon_radar_core::{
    heading_vector, CellCoord, TileMap, FIELD_OF_VIEW, RAY_STEP, RENDER_DEPTH,
};
use glam::Vec2;
use rand::Rng;

use crate::{Camera, DepthBuffer, Frame};

/// Wall glyphs from nearest to farthest.
const WALL_SHADES: [char; 5] = ['█', '▓', '▒', '░', '·'];
/// Glyphs used for wall cells with at most two wall neighbours.
const CORNER_GLYPHS: [char; 9] = ['╬', '╩', '╦', '╣', '╠', '╔', '╗', '╝', '╚'];
/// Floor glyphs from the horizon down to the bottom row.
const FLOOR_GRADIENT: [char; 6] = ['.', '_', '-', '~', '=', ':'];

/// Outcome of marching a single ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance travelled, capped at the render depth.
    pub distance: f32,
    /// Wall cell that stopped the ray, `None` when nothing was hit in range.
    pub cell: Option<CellCoord>,
}

/// Marches a ray in fixed steps until it enters a wall or leaves the render depth.
#[must_use]
pub fn cast_ray(map: &TileMap, origin: Vec2, angle: f32) -> RayHit {
    let direction = heading_vector(angle);
    let steps = (RENDER_DEPTH / RAY_STEP).ceil() as u32;

    for step in 1..=steps {
        let distance = step as f32 * RAY_STEP;
        let point = origin + direction * distance;
        if !map.tile_at(point).is_floor() {
            return RayHit {
                distance: distance.min(RENDER_DEPTH),
                cell: CellCoord::containing(point),
            };
        }
    }

    RayHit {
        distance: RENDER_DEPTH,
        cell: None,
    }
}

/// Draws every column of the 3-D view and returns the resulting depth buffer.
///
/// Column `x` looks along `heading - FOV/2 + x/width * FOV`, so columns grow
/// to the right of the view.
pub fn render_walls<R: Rng + ?Sized>(
    frame: &mut Frame,
    map: &TileMap,
    camera: &Camera,
    rng: &mut R,
) -> DepthBuffer {
    let width = frame.width();
    let mut depth = DepthBuffer::cleared(width);

    for column in 0..width {
        let angle = camera.heading - FIELD_OF_VIEW / 2.0
            + column as f32 / width as f32 * FIELD_OF_VIEW;
        let hit = cast_ray(map, camera.position, angle);
        depth.set(column, hit.distance);

        let glyph = match hit.cell {
            Some(cell) if map.wall_neighbours(cell) <= 2 => {
                CORNER_GLYPHS[rng.gen_range(0..CORNER_GLYPHS.len())]
            }
            _ => wall_shade(hit.distance),
        };
        draw_column(frame, column as i32, hit.distance, camera.bob, glyph);
    }

    depth
}

fn draw_column(frame: &mut Frame, column: i32, distance: f32, bob: i32, glyph: char) {
    let height = frame.height() as i32;
    let rows = frame.height() as f32;
    let horizon = rows / 2.0;

    let ceiling = (horizon - rows / distance) as i32;
    let floor = height - ceiling;
    let (ceiling, floor) = (ceiling + bob, floor + bob);

    for row in 0..height {
        let cell = if row <= ceiling {
            ' '
        } else if row <= floor {
            glyph
        } else {
            floor_glyph(row, horizon)
        };
        frame.set(column, row, cell);
    }
}

fn wall_shade(distance: f32) -> char {
    let last = WALL_SHADES.len() - 1;
    let index = ((distance / RENDER_DEPTH * last as f32) as usize).min(last);
    WALL_SHADES[index]
}

fn floor_glyph(row: i32, horizon: f32) -> char {
    let last = FLOOR_GRADIENT.len() - 1;
    let below = (row as f32 - horizon) / horizon;
    let index = ((below * last as f32) as usize).min(last);
    FLOOR_GRADIENT[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_radar_core::Tile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bordered(columns: u32, rows: u32) -> TileMap {
        let mut map = TileMap::filled(columns, rows, Tile::Floor);
        map.enforce_border();
        map
    }

    #[test]
    fn ray_stops_at_the_first_wall_cell() {
        let hit = cast_ray(&bordered(12, 12), Vec2::new(5.5, 5.5), 0.0);

        assert!((hit.distance - 5.5).abs() < 1e-3, "hit at {}", hit.distance);
        assert_eq!(hit.cell, Some(CellCoord::new(5, 11)));
    }

    #[test]
    fn ray_without_a_wall_in_range_reports_a_miss() {
        let hit = cast_ray(&bordered(40, 40), Vec2::new(20.5, 2.5), 0.0);

        assert_eq!(hit.distance, RENDER_DEPTH);
        assert_eq!(hit.cell, None);
    }

    #[test]
    fn empty_column_draws_distant_slab_over_floor_gradient() {
        let mut frame = Frame::blank(1, 32);
        draw_column(&mut frame, 0, RENDER_DEPTH, 0, wall_shade(RENDER_DEPTH));

        let column: String = (0..32).filter_map(|row| frame.get(0, row)).collect();
        assert_eq!(column, "               ····.___---~~~===");
    }

    #[test]
    fn bob_shifts_the_slab() {
        let mut still = Frame::blank(1, 32);
        let mut bobbing = Frame::blank(1, 32);
        draw_column(&mut still, 0, 4.0, 0, '█');
        draw_column(&mut bobbing, 0, 4.0, 1, '█');

        let first_wall = |frame: &Frame| (0..32).find(|&row| frame.get(0, row) == Some('█'));
        assert_eq!(first_wall(&still), Some(9));
        assert_eq!(first_wall(&bobbing), Some(10));
    }

    #[test]
    fn isolated_pillars_use_corner_glyphs() {
        let mut map = bordered(12, 12);
        map.set(CellCoord::new(5, 6), Tile::Wall);
        let camera = Camera {
            position: Vec2::new(5.5, 2.5),
            heading: 0.0,
            bob: 0,
        };
        let mut frame = Frame::blank(100, 32);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let depth = render_walls(&mut frame, &map, &camera, &mut rng);

        assert!((depth.get(50) - 3.5).abs() < 1e-3);
        let glyph = frame.get(50, 16).unwrap_or(' ');
        assert!(CORNER_GLYPHS.contains(&glyph), "found {glyph:?}");
    }

    #[test]
    fn nearer_walls_use_denser_shades() {
        assert_eq!(wall_shade(0.5), '█');
        assert_eq!(wall_shade(RENDER_DEPTH), '·');
        assert_eq!(wall_shade(RENDER_DEPTH * 10.0), '·');
    }
}
