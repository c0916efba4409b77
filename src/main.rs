use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use directories::ProjectDirs;
use rand::rngs::StdRng;
use rand::SeedableRng;

use archery::audio::Audio;
use archery::compute::{init_state, move_archer_down, move_archer_up, tick};
use archery::config::Config;
use archery::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use archery::display::{self, Viewport};
use archery::entities::{GameState, Shot};
use archery::error::GameError;
use archery::input::{command_for, fire, Command, HeldKeys, Steer};
use archery::tilemap::TileMap;

/// Log filter variable, e.g. `ARCHERY_LOG=debug`.
const LOG_ENV: &str = "ARCHERY_LOG";

// ── Logging ───────────────────────────────────────────────────────────────────

/// Route `log` output to a file; stdout belongs to the game screen.
/// Without a writable data directory the game runs unlogged.
fn init_logging() {
    let Some(dirs) = ProjectDirs::from("", "", "archery") else {
        return;
    };
    let dir = dirs.data_local_dir();
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("archery.log"))
    else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Assets ────────────────────────────────────────────────────────────────────

fn load_tile_map(config: &Config) -> Result<TileMap, GameError> {
    if let Some(path) = &config.tile_map {
        log::info!("loading tile map {}", path.display());
        return TileMap::load(path);
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tile = archery::constants::DEFAULT_TILE_SIZE;
    let cols = (WORLD_WIDTH as u32).div_ceil(tile);
    let rows = (WORLD_HEIGHT as u32).div_ceil(tile);
    log::info!("generating {cols}x{rows} meadow (seed {:?})", config.seed);
    Ok(TileMap::generate(cols, rows, tile, tile, &mut rng))
}

fn current_viewport() -> std::io::Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport::new(cols, rows, WORLD_WIDTH, WORLD_HEIGHT))
}

// ── Start screen ──────────────────────────────────────────────────────────────

enum StartResult {
    Start,
    Quit,
}

/// Block until the start button is clicked (or Enter pressed).
fn start_screen<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<StartResult> {
    let mut viewport = current_viewport()?;
    display::draw_start_screen(out, &viewport)?;

    loop {
        let Ok(ev) = rx.recv() else {
            return Ok(StartResult::Quit);
        };
        match ev {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) if display::hits_start_button(&viewport, column, row) => {
                return Ok(StartResult::Start);
            }
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if code == KeyCode::Enter {
                    return Ok(StartResult::Start);
                }
                if command_for(code, modifiers) == Some(Command::Quit) {
                    return Ok(StartResult::Quit);
                }
            }
            Event::Resize(cols, rows) => {
                viewport = Viewport::new(cols, rows, WORLD_WIDTH, WORLD_HEIGHT);
                display::draw_start_screen(out, &viewport)?;
            }
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Game over freezes the field but keeps
/// the loop (and the quit key) alive.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    map: &TileMap,
    audio: &Audio,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<()> {
    let mut viewport = current_viewport()?;
    let mut held = HeldKeys::new();

    loop {
        let frame_start = Instant::now();

        // ── Input ─────────────────────────────────────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    held.record(&key, state.frame);
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match command_for(key.code, key.modifiers) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Fire) => *state = fire(out, state, audio)?,
                        None => {}
                    }
                }
                Event::Resize(cols, rows) => {
                    viewport = Viewport::new(cols, rows, WORLD_WIDTH, WORLD_HEIGHT);
                }
                _ => {}
            }
        }

        // ── Held-key movement ─────────────────────────────────────────────────
        match held.steer(state.frame) {
            Steer::Up => *state = move_archer_up(state),
            Steer::Down => *state = move_archer_down(state),
            Steer::Still => {}
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let before = state.clone();
        *state = tick(state);
        log_transition(&before, state);

        display::render(out, state, map, &viewport, audio.music_playing())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn log_transition(before: &GameState, after: &GameState) {
    if before.arrow.in_flight && !after.arrow.in_flight {
        match after.last_shot {
            Some(Shot::Hit(ring)) => {
                log::debug!("{} +{} (score {})", ring.label(), ring.points(), after.score)
            }
            Some(Shot::Miss) => log::debug!("miss ({} chances left)", after.chances),
            None => {}
        }
    }
    if !before.is_over() && after.is_over() {
        log::info!("game over, final score {}", after.score);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();

    let config = Config::load()?;
    log::info!("config: {config:?}");
    let map = load_tile_map(&config)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Release events end a held move at once; without them keys expire
    // after HOLD_WINDOW frames.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // event::read blocks, so it gets its own thread feeding the loop.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config, &map);

    // Restore the terminal even when the game failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("quit");
    result.map_err(GameError::from)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    map: &TileMap,
) -> std::io::Result<()> {
    let mut audio = Audio::new(config);

    if let StartResult::Quit = start_screen(out, rx)? {
        return Ok(());
    }

    log::info!("game started");
    audio.play_music();
    let mut state = init_state(WORLD_WIDTH, WORLD_HEIGHT);
    let result = game_loop(out, &mut state, map, &audio, rx, config.frame_duration());
    audio.stop_music();
    result
}
