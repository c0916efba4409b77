use archery::compute::init_state;
use archery::constants::*;
use archery::display::*;
use archery::entities::{GameStatus, Rect, Ring, Shot};
use archery::tilemap::TileMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewport() -> Viewport {
    Viewport::new(80, 24, WORLD_WIDTH, WORLD_HEIGHT)
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn play_area_sits_between_hud_and_hint() {
    let v = viewport();
    assert_eq!(v.play_rows(), 22);
    assert_eq!(v.play_bottom(), 23);
    assert_eq!(v.row_of(0), 1);
    assert_eq!(v.col_of(0), 0);
    assert_eq!(v.col_of(WORLD_WIDTH), 80);
}

#[test]
fn cells_round_trip_through_world() {
    let v = viewport();
    for row in 1..v.play_bottom() {
        for col in 0..v.cols {
            let (x, y) = v.to_world(col, row).unwrap();
            assert_eq!(v.col_of(x), i64::from(col));
            assert_eq!(v.row_of(y), i64::from(row));
        }
    }
}

#[test]
fn hud_and_hint_rows_are_not_world() {
    let v = viewport();
    assert_eq!(v.to_world(10, 0), None);
    assert_eq!(v.to_world(10, 23), None);
    assert_eq!(v.to_world(80, 5), None);
}

#[test]
fn cells_of_clips_and_keeps_one_cell() {
    let v = viewport();
    let tiny = v.cells_of(&Rect::new(400, 300, 1, 1)).unwrap();
    assert_eq!((tiny.width(), tiny.height()), (1, 1));

    let target = v.cells_of(&Rect::new(600, 250, 100, 100)).unwrap();
    assert_eq!((target.col0, target.col1), (60, 70));

    let partly_off = v.cells_of(&Rect::new(780, 0, 100, 20)).unwrap();
    assert_eq!(partly_off.col1, 80);

    assert_eq!(v.cells_of(&Rect::new(900, 0, 60, 20)), None);
}

// ── Start button ──────────────────────────────────────────────────────────────

#[test]
fn start_button_geometry() {
    assert_eq!(start_button(800, 600), Rect::new(300, 300, 200, 60));
}

#[test]
fn clicks_inside_the_button_start() {
    let v = viewport();
    let cells = v.cells_of(&start_button(WORLD_WIDTH, WORLD_HEIGHT)).unwrap();
    assert!(hits_start_button(&v, cells.col0, cells.row0));
    assert!(hits_start_button(&v, cells.col1 - 1, cells.row1 - 1));
    assert!(hits_start_button(&v, 40, cells.row0));
}

#[test]
fn clicks_outside_the_button_do_not_start() {
    let v = viewport();
    let cells = v.cells_of(&start_button(WORLD_WIDTH, WORLD_HEIGHT)).unwrap();
    assert!(!hits_start_button(&v, cells.col0 - 1, cells.row0));
    assert!(!hits_start_button(&v, 40, cells.row1 + 1));
    assert!(!hits_start_button(&v, 40, 0));
    assert!(!hits_start_button(&v, 0, 1));
}

#[test]
fn start_screen_shows_title_and_button() {
    let mut out: Vec<u8> = Vec::new();
    draw_start_screen(&mut out, &viewport()).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("ARCHERY"));
    assert!(text.contains("Start Game"));
}

// ── Frame rendering ───────────────────────────────────────────────────────────

fn render_to_string(state: &archery::entities::GameState, music: bool) -> String {
    let map = TileMap::generate(25, 19, 32, 32, &mut StdRng::seed_from_u64(1));
    let mut out: Vec<u8> = Vec::new();
    render(&mut out, state, &map, &viewport(), music).unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn frame_shows_hud() {
    let mut state = init_state(WORLD_WIDTH, WORLD_HEIGHT);
    state.score = 175;
    state.chances = 3;
    state.last_shot = Some(Shot::Hit(Ring::Inner));
    let text = render_to_string(&state, false);
    assert!(text.contains("Score: 175   Chances Left: 3"));
    assert!(text.contains("Inner ring! +75"));
    assert!(!text.contains("GAME  OVER"));
}

#[test]
fn frame_shows_game_over_overlay() {
    let mut state = init_state(WORLD_WIDTH, WORLD_HEIGHT);
    state.status = GameStatus::GameOver;
    state.chances = 0;
    state.score = 50;
    let text = render_to_string(&state, false);
    assert!(text.contains("GAME  OVER"));
    assert!(text.contains("Final Score: 50"));
}

#[test]
fn music_indicator_follows_playback() {
    let state = init_state(WORLD_WIDTH, WORLD_HEIGHT);
    assert!(!render_to_string(&state, false).contains('♪'));
    assert!(render_to_string(&state, true).contains('♪'));
}
