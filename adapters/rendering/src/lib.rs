#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts and glyph renderers for Dungeon Radar adapters.
//!
//! A frame is composed in a fixed order: walls fill every column and the
//! depth buffer, sprites and bullets are stamped where no nearer wall hides
//! them, the weapon overlay follows, and the radar panel goes on top.

mod frame;
mod hud;
mod minimap;
mod sprites;
mod walls;

use anyhow::Result as AnyResult;
use dungeon_radar_core::{
    Action, BulletView, EnemyView, PlayerSnapshot, TileMap, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use glam::Vec2;
use rand::Rng;

pub use frame::{DepthBuffer, Frame};
pub use hud::{draw_gun, GameOver, SessionEnd, StatusLine};
pub use minimap::{draw_minimap, from_panel, panel_center, to_panel};
pub use sprites::{draw_bullets, draw_enemies, line_of_sight, project_column};
pub use walls::{cast_ray, render_walls, RayHit};

/// Viewpoint used to project the dungeon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World position of the eye.
    pub position: Vec2,
    /// Viewing direction in radians, 0 facing +y.
    pub heading: f32,
    /// Vertical shift in rows applied to the whole view.
    pub bob: i32,
}

impl Camera {
    /// Places the camera at the player's eye, including walking bob.
    #[must_use]
    pub fn from_player(player: &PlayerSnapshot) -> Self {
        Self {
            position: player.position,
            heading: player.heading,
            bob: player.bob_offset(),
        }
    }
}

/// Everything the renderer needs to draw one tick.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Dungeon being explored.
    pub map: &'a TileMap,
    /// Player viewpoint.
    pub camera: Camera,
    /// Every enemy; dead ones are skipped.
    pub enemies: &'a EnemyView,
    /// Bullets in flight.
    pub bullets: &'a BulletView,
    /// Whether the radar panel is drawn.
    pub show_minimap: bool,
}

/// Builds the full-size frame for the scene.
///
/// `rng` only picks corner glyphs; a seeded generator keeps frames reproducible.
pub fn compose<R: Rng + ?Sized>(scene: &Scene<'_>, rng: &mut R) -> Frame {
    compose_sized(scene, SCREEN_WIDTH, SCREEN_HEIGHT, rng)
}

/// Builds a frame of an explicit size for the scene.
pub fn compose_sized<R: Rng + ?Sized>(
    scene: &Scene<'_>,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Frame {
    let mut frame = Frame::blank(width, height);
    let depth = render_walls(&mut frame, scene.map, &scene.camera, rng);
    draw_enemies(&mut frame, scene.map, &scene.camera, scene.enemies, &depth);
    draw_bullets(&mut frame, &scene.camera, scene.bullets, &depth);
    draw_gun(&mut frame);
    if scene.show_minimap {
        draw_minimap(
            &mut frame,
            scene.map,
            &scene.camera,
            scene.enemies,
            scene.bullets,
        );
    }
    frame
}

/// Frame and status line handed to a backend each tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Rendered view.
    pub frame: Frame,
    /// Summary printed under the view.
    pub status: StatusLine,
}

/// Rendering backend capable of presenting frames.
pub trait RenderingBackend {
    /// Draws one tick's frame and status line.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;

    /// Shows the end-of-session screen.
    fn present_game_over(&mut self, game_over: &GameOver) -> AnyResult<()>;
}

/// Non-blocking source of player actions.
pub trait InputSource {
    /// Returns the next pending action, or `None` when nothing is waiting.
    fn poll_action(&mut self) -> AnyResult<Option<Action>>;
}
