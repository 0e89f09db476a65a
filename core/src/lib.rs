#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dungeon Radar engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod tiles;

use std::{
    f32::consts::{FRAC_PI_3, PI, TAU},
    time::Duration,
};

use glam::Vec2;

pub use tiles::TileMap;

/// Horizontal field of view of the first-person projection, in radians.
pub const FIELD_OF_VIEW: f32 = FRAC_PI_3;
/// Furthest distance, in tiles, that rays and sprites are resolved at.
pub const RENDER_DEPTH: f32 = 16.0;
/// Number of glyph columns in the rendered view.
pub const SCREEN_WIDTH: usize = 100;
/// Number of glyph rows in the rendered view.
pub const SCREEN_HEIGHT: usize = 32;
/// Distance advanced per sample while marching a wall ray.
pub const RAY_STEP: f32 = 0.05;
/// Distance advanced per sample while checking sprite line of sight.
pub const SIGHT_STEP: f32 = 0.2;

/// Player walking speed in tiles per second.
pub const MOVE_SPEED: f32 = 3.0;
/// Player turning speed in radians per second.
pub const TURN_SPEED: f32 = 4.5;
/// Health the player starts the session with.
pub const MAX_HEALTH: f32 = 100.0;
/// Angular rate of the walking bob oscillator in radians per second.
pub const BOB_SPEED: f32 = 6.0;
/// Peak vertical view offset produced by the bob oscillator, in rows.
pub const BOB_INTENSITY: f32 = 1.0;
/// Multiplicative decay applied to the bob phase on every idle tick.
pub const BOB_DAMPING: f32 = 0.9;

/// Bullet travel speed in tiles per second.
pub const BULLET_SPEED: f32 = 8.0;
/// Seconds a bullet survives before expiring.
pub const BULLET_LIFETIME: f32 = 2.0;

/// Enemy pursuit speed in tiles per second.
pub const ENEMY_SPEED: f32 = 1.0;
/// Enemies stop advancing once they are this close to the player.
pub const ENEMY_STANDOFF: f32 = 1.0;
/// Enemies ignore the player beyond this distance.
pub const ENEMY_DETECTION_RADIUS: f32 = 8.0;
/// Number of enemies placed by the spawner at session start.
pub const ENEMY_COUNT: usize = 7;
/// Enemies never spawn closer than this to the player.
pub const ENEMY_MIN_SPAWN_DISTANCE: f32 = 6.0;

/// A bullet this close to a live enemy kills it.
pub const KILL_RADIUS: f32 = 0.5;
/// A live enemy this close to the player drains health.
pub const TOUCH_RADIUS: f32 = 1.0;
/// Health drained per second by each touching enemy.
pub const CONTACT_DAMAGE_RATE: f32 = 5.0;

/// Number of tile columns in a generated dungeon.
pub const MAP_COLUMNS: u32 = 60;
/// Number of tile rows in a generated dungeon.
pub const MAP_ROWS: u32 = 35;
/// Number of random room placements attempted per dungeon.
pub const ROOM_ATTEMPTS: u32 = 25;
/// Smallest room edge length, in tiles.
pub const ROOM_MIN_SIZE: u32 = 4;
/// Largest room edge length, in tiles.
pub const ROOM_MAX_SIZE: u32 = 10;

/// Radius of the ring search used to pull the player back onto the floor.
pub const RECOVERY_RADIUS: u32 = 5;
/// Spawn position used when a dungeon contains no open cell at all.
pub const FALLBACK_SPAWN: Vec2 = Vec2::new(2.5, 2.5);

/// Radius of the radar panel measured in tiles.
pub const MINIMAP_RADIUS: i32 = 7;
/// Offset of the radar panel from the top-left frame corner, in glyphs.
pub const MINIMAP_MARGIN: i32 = 2;

/// Target wall-clock interval between simulation ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);
/// Largest elapsed time a single tick is allowed to simulate.
pub const MAX_TICK_DURATION: Duration = Duration::from_millis(100);

/// Terrain stored in a single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Solid cell that blocks movement, bullets, and sight.
    Wall,
    /// Open cell entities may occupy.
    Floor,
}

impl Tile {
    /// Reports whether the tile can be occupied.
    #[must_use]
    pub const fn is_floor(self) -> bool {
        matches!(self, Self::Floor)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// World-space position of the cell's center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.column as f32 + 0.5, self.row as f32 + 0.5)
    }

    /// Cell containing the provided world-space position, if it is not negative.
    #[must_use]
    pub fn containing(point: Vec2) -> Option<Self> {
        if point.x >= 0.0 && point.y >= 0.0 {
            Some(Self::new(point.x as u32, point.y as u32))
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Column one past the right edge of the rectangle.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.origin.column() + self.size.width()
    }

    /// Row one past the bottom edge of the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.origin.row() + self.size.height()
    }

    /// Cell halfway between the rectangle's corners, rounded toward the origin.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(
            (self.origin.column() + self.right()) / 2,
            (self.origin.row() + self.bottom()) / 2,
        )
    }

    /// Reports whether the cell lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() >= self.origin.column()
            && cell.column() < self.right()
            && cell.row() >= self.origin.row()
            && cell.row() < self.bottom()
    }

    /// Iterates every cell covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let (left, right) = (self.origin.column(), self.right());
        (self.origin.row()..self.bottom())
            .flat_map(move |row| (left..right).map(move |column| CellCoord::new(column, row)))
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Discrete actions reported by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rotate the view counter-clockwise.
    TurnLeft,
    /// Rotate the view clockwise.
    TurnRight,
    /// Walk one tick's worth of distance along the facing direction.
    MoveForward,
    /// Launch a bullet along the facing direction.
    Fire,
    /// Show or hide the radar panel.
    ToggleMap,
    /// End the session.
    Quit,
}

/// Rotational direction of a player turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Decreases the facing angle.
    Left,
    /// Increases the facing angle.
    Right,
}

impl Turn {
    /// Sign applied to the turn rate.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Places the player at the provided position with full health.
    SpawnPlayer {
        /// World-space position the player starts from.
        position: Vec2,
    },
    /// Adds a live enemy at the provided position.
    SpawnEnemy {
        /// World-space position the enemy starts from.
        position: Vec2,
    },
    /// Moves the player to the nearest floor cell if it ended up inside a wall.
    RecoverPlayer,
    /// Rotates the player's facing angle.
    TurnPlayer {
        /// Direction of the rotation.
        turn: Turn,
        /// Elapsed time the turn rate is applied over.
        dt: Duration,
    },
    /// Walks the player forward if the destination tile is floor.
    AdvancePlayer {
        /// Elapsed time the walking speed is applied over.
        dt: Duration,
    },
    /// Launches a bullet from the player's position along its facing.
    FireBullet,
    /// Advances bullets and the walking bob by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that an enemy move by the provided offset.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
        /// World-space offset of the attempted step.
        delta: Vec2,
    },
    /// Resolves a bullet striking an enemy.
    ResolveHit {
        /// Enemy struck by the bullet.
        enemy: EnemyId,
        /// Bullet that struck the enemy.
        bullet: BulletId,
    },
    /// Drains the provided amount of health from the player.
    DamagePlayer {
        /// Health points removed.
        amount: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the player was placed into the dungeon.
    PlayerSpawned {
        /// Position the player occupies.
        position: Vec2,
    },
    /// Confirms that an enemy was placed into the dungeon.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Position the enemy occupies.
        position: Vec2,
    },
    /// Reports that the player was pulled out of a wall.
    PlayerRecovered {
        /// Position inside the wall.
        from: Vec2,
        /// Floor position the player was moved to.
        to: Vec2,
    },
    /// Reports the player's facing angle after a turn.
    PlayerTurned {
        /// Facing angle in radians, wrapped to `[-PI, PI)`.
        heading: f32,
    },
    /// Confirms that the player walked between two positions.
    PlayerMoved {
        /// Position before the step.
        from: Vec2,
        /// Position after the step.
        to: Vec2,
    },
    /// Reports that a forward step was refused because it ended in a wall.
    PlayerBlocked,
    /// Confirms that a bullet was launched.
    BulletFired {
        /// Identifier assigned to the bullet.
        bullet: BulletId,
        /// Launch position.
        position: Vec2,
        /// Fixed travel heading in radians.
        heading: f32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that a bullet ran out of lifetime.
    BulletExpired {
        /// Identifier of the expired bullet.
        bullet: BulletId,
    },
    /// Reports that a bullet was destroyed by entering a wall tile.
    BulletHitWall {
        /// Identifier of the destroyed bullet.
        bullet: BulletId,
    },
    /// Confirms that an enemy moved.
    EnemyMoved {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Position before the step.
        from: Vec2,
        /// Position after the step.
        to: Vec2,
    },
    /// Reports that an enemy step was undone because it ended in a wall.
    EnemyBlocked {
        /// Identifier of the enemy.
        enemy: EnemyId,
    },
    /// Confirms that a bullet killed an enemy.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
        /// Identifier of the bullet consumed by the kill.
        bullet: BulletId,
        /// Kill counter after the kill.
        kills: u32,
    },
    /// Reports health drained from the player.
    PlayerDamaged {
        /// Health removed by the command, after clamping at zero.
        amount: f32,
        /// Remaining health.
        health: f32,
    },
    /// Announces that the player's health reached zero.
    PlayerDied,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Continuous world-space position.
    pub position: Vec2,
    /// Facing angle in radians; zero faces along increasing rows.
    pub heading: f32,
    /// Remaining health in `0.0..=MAX_HEALTH`.
    pub health: f32,
    /// Oscillator state driving the walking bob.
    pub bob_phase: f32,
}

impl PlayerSnapshot {
    /// Whole-row vertical view offset produced by the walking bob.
    #[must_use]
    pub fn bob_offset(&self) -> i32 {
        (self.bob_phase.sin() * BOB_INTENSITY).round() as i32
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Continuous world-space position.
    pub position: Vec2,
    /// Whether the enemy is still alive.
    pub alive: bool,
}

/// Read-only snapshot describing every enemy, dead ones included.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the enemies that are still alive.
    pub fn alive(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.alive)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single bullet used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier assigned to the bullet.
    pub id: BulletId,
    /// Continuous world-space position.
    pub position: Vec2,
    /// Fixed travel heading in radians.
    pub heading: f32,
    /// Seconds of flight left.
    pub lifetime: f32,
}

/// Read-only snapshot describing every live bullet.
#[derive(Clone, Debug, Default)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured bullet snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured bullets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no bullet is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BulletSnapshot> {
        self.snapshots
    }
}

/// Lifecycle of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// The simulation accepts input and advances every tick.
    Running,
    /// Terminal state entered on quit or when health runs out.
    Dead,
}

impl SessionState {
    /// Applies the only legal transition, `Running` to `Dead`.
    ///
    /// The session dies when the player asked to quit or when health is no
    /// longer positive. `Dead` never leaves.
    #[must_use]
    pub fn advance(self, health: f32, quit_requested: bool) -> Self {
        match self {
            Self::Running if quit_requested || health <= 0.0 => Self::Dead,
            state => state,
        }
    }

    /// Reports whether the session still runs.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Total simulated time reported by the `TimeAdvanced` events in a batch.
#[must_use]
pub fn elapsed(events: &[Event]) -> Duration {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TimeAdvanced { dt } => Some(*dt),
            _ => None,
        })
        .fold(Duration::ZERO, Duration::saturating_add)
}

/// Unit vector pointing along the provided heading.
///
/// Heading zero points toward increasing rows and grows toward increasing
/// columns, matching the left-to-right sweep of the projected view.
#[must_use]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Wraps an angle into `[-PI, PI)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for inputs just below a multiple of it.
    if wrapped >= PI {
        -PI
    } else {
        wrapped
    }
}

/// Rotates an offset counter-clockwise by the provided angle.
#[must_use]
pub fn rotate(offset: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(offset)
}
