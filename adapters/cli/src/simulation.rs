//! Session state machine tying the world, systems and renderer together.

use std::time::Duration;

use dungeon_radar_core::{Action, Command, Event, SessionState, TileMap, Turn, MAX_TICK_DURATION};
use dungeon_radar_rendering::{
    compose, Camera, GameOver, Presentation, Scene, SessionEnd, StatusLine,
};
use dungeon_radar_system_combat::Combat;
use dungeon_radar_system_map_generation::{self as map_generation, MapGeneration};
use dungeon_radar_system_pursuit::Pursuit;
use dungeon_radar_system_spawning::{self as spawning, Spawning};
use dungeon_radar_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SPAWN_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;
const GLYPH_STREAM: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// One running game: world state, the systems acting on it and the view toggle.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    pursuit: Pursuit,
    combat: Combat,
    state: SessionState,
    show_minimap: bool,
    glyph_rng: ChaCha8Rng,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Simulation {
    /// Generates a dungeon from the seed and populates it.
    pub(crate) fn new(seed: u64, show_minimap: bool) -> Self {
        let generated = MapGeneration::new(map_generation::Config::standard(seed)).generate();
        tracing::info!(seed, rooms = generated.rooms().len(), "dungeon generated");
        Self::with_map(generated.into_map(), seed, show_minimap)
    }

    fn with_map(map: TileMap, seed: u64, show_minimap: bool) -> Self {
        let mut simulation = Self {
            world: World::new(map),
            pursuit: Pursuit::new(),
            combat: Combat::new(),
            state: SessionState::Running,
            show_minimap,
            glyph_rng: ChaCha8Rng::seed_from_u64(seed ^ GLYPH_STREAM),
            events: Vec::new(),
            commands: Vec::new(),
        };

        Spawning::new(spawning::Config::standard(seed ^ SPAWN_STREAM))
            .handle(query::tile_map(&simulation.world), &mut simulation.commands);
        simulation.flush();

        let player = query::player(&simulation.world);
        tracing::info!(
            x = player.position.x,
            y = player.position.y,
            enemies = query::remaining_enemies(&simulation.world),
            "session populated"
        );
        simulation.events.clear();
        simulation
    }

    /// Advances the session by one tick.
    ///
    /// `dt` is capped at [`MAX_TICK_DURATION`]. Once the session is dead it
    /// stays dead and further calls change nothing.
    pub(crate) fn step(&mut self, dt: Duration, action: Option<Action>) -> SessionState {
        if !self.state.is_running() {
            return self.state;
        }

        let dt = dt.min(MAX_TICK_DURATION);
        self.events.clear();
        self.apply(Command::RecoverPlayer);

        let mut quit_requested = false;
        match action {
            Some(Action::TurnLeft) => self.apply(Command::TurnPlayer {
                turn: Turn::Left,
                dt,
            }),
            Some(Action::TurnRight) => self.apply(Command::TurnPlayer {
                turn: Turn::Right,
                dt,
            }),
            Some(Action::MoveForward) => self.apply(Command::AdvancePlayer { dt }),
            Some(Action::Fire) => self.apply(Command::FireBullet),
            Some(Action::ToggleMap) => self.show_minimap = !self.show_minimap,
            Some(Action::Quit) => quit_requested = true,
            None => {}
        }

        self.apply(Command::Tick { dt });

        self.pursuit.handle(
            &self.events,
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.combat.handle(
            &self.events,
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            &query::bullet_view(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.log_events();
        self.state = self
            .state
            .advance(query::player(&self.world).health, quit_requested);
        self.state
    }

    /// Renders the current tick.
    pub(crate) fn presentation(&mut self) -> Presentation {
        let player = query::player(&self.world);
        let enemies = query::enemy_view(&self.world);
        let bullets = query::bullet_view(&self.world);
        let scene = Scene {
            map: query::tile_map(&self.world),
            camera: Camera::from_player(&player),
            enemies: &enemies,
            bullets: &bullets,
            show_minimap: self.show_minimap,
        };

        Presentation {
            frame: compose(&scene, &mut self.glyph_rng),
            status: StatusLine {
                health: player.health,
                kills: query::kill_count(&self.world),
                enemies: query::remaining_enemies(&self.world),
            },
        }
    }

    /// Describes how the session ended.
    pub(crate) fn game_over(&self) -> GameOver {
        let end = if query::player(&self.world).health <= 0.0 {
            SessionEnd::Died
        } else {
            SessionEnd::Quit
        };
        GameOver {
            end,
            kills: query::kill_count(&self.world),
        }
    }

    fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn log_events(&self) {
        for event in &self.events {
            match event {
                Event::EnemyKilled { enemy, kills, .. } => {
                    tracing::info!(enemy = enemy.get(), kills = *kills, "enemy killed");
                }
                Event::PlayerDied => tracing::info!("player died"),
                Event::PlayerRecovered { from, to } => {
                    tracing::warn!(?from, ?to, "player moved out of a wall");
                }
                Event::BulletFired { bullet, .. } => {
                    tracing::debug!(bullet = bullet.get(), "bullet fired");
                }
                _ => {}
            }
        }
    }
}
