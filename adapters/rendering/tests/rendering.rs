use dungeon_radar_core::{
    BulletView, CellCoord, EnemyId, EnemySnapshot, EnemyView, Tile, TileMap, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
use dungeon_radar_rendering::{
    compose, draw_enemies, Camera, DepthBuffer, Frame, Scene,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ENEMY_GLYPH: char = '⣿';
const CENTER_COLUMN: usize = SCREEN_WIDTH / 2;

fn hall() -> TileMap {
    let mut map = TileMap::filled(20, 20, Tile::Floor);
    map.enforce_border();
    map
}

fn camera() -> Camera {
    Camera {
        position: Vec2::new(10.5, 3.5),
        heading: 0.0,
        bob: 0,
    }
}

fn enemy_ahead() -> EnemyView {
    EnemyView::from_snapshots(vec![EnemySnapshot {
        id: EnemyId::new(0),
        position: Vec2::new(10.5, 9.5),
        alive: true,
    }])
}

fn render(map: &TileMap, enemies: &EnemyView) -> Frame {
    let bullets = BulletView::default();
    let scene = Scene {
        map,
        camera: camera(),
        enemies,
        bullets: &bullets,
        show_minimap: false,
    };
    compose(&scene, &mut ChaCha8Rng::seed_from_u64(17))
}

#[test]
fn wall_segment_hides_the_enemy_behind_it() {
    let open = hall();
    let mut walled = hall();
    for column in 8..=12 {
        walled.set(CellCoord::new(column, 6), Tile::Wall);
    }
    let enemies = enemy_ahead();

    let visible = render(&open, &enemies);
    let hidden = render(&walled, &enemies);

    assert!(visible.column_contains(CENTER_COLUMN, ENEMY_GLYPH));
    assert_eq!(hidden.count(ENEMY_GLYPH), 0);
}

#[test]
fn dead_enemies_are_not_drawn() {
    let enemies = EnemyView::from_snapshots(vec![EnemySnapshot {
        id: EnemyId::new(0),
        position: Vec2::new(10.5, 9.5),
        alive: false,
    }]);

    assert_eq!(render(&hall(), &enemies).count(ENEMY_GLYPH), 0);
}

#[test]
fn nearer_wall_column_wins_over_the_enemy() {
    let map = hall();
    let enemies = enemy_ahead();
    let mut near = vec![12.0; SCREEN_WIDTH];
    near[CENTER_COLUMN] = 3.0;

    let mut blocked = Frame::blank(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_enemies(
        &mut blocked,
        &map,
        &camera(),
        &enemies,
        &DepthBuffer::from_distances(near),
    );
    assert!(!blocked.column_contains(CENTER_COLUMN, ENEMY_GLYPH));

    let mut drawn = Frame::blank(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_enemies(
        &mut drawn,
        &map,
        &camera(),
        &enemies,
        &DepthBuffer::from_distances(vec![12.0; SCREEN_WIDTH]),
    );
    assert!(drawn.column_contains(CENTER_COLUMN, ENEMY_GLYPH));
}

#[test]
fn closer_enemies_are_drawn_larger() {
    let map = hall();
    let depth = DepthBuffer::cleared(SCREEN_WIDTH);
    let at = |y: f32| {
        EnemyView::from_snapshots(vec![EnemySnapshot {
            id: EnemyId::new(0),
            position: Vec2::new(10.5, y),
            alive: true,
        }])
    };

    let mut near = Frame::blank(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_enemies(&mut near, &map, &camera(), &at(6.5), &depth);
    let mut far = Frame::blank(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_enemies(&mut far, &map, &camera(), &at(15.5), &depth);

    assert!(near.count(ENEMY_GLYPH) > far.count(ENEMY_GLYPH));
    assert!(far.count(ENEMY_GLYPH) > 0);
}
