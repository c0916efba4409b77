/// Rendering layer: all terminal drawing lives here.
///
/// The simulation runs in world units; a `Viewport` scales world rects onto
/// the terminal grid.  Each draw function receives a mutable writer and an
/// immutable view of the state.  No game logic is performed; this module
/// only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::constants::{START_BUTTON_HEIGHT, START_BUTTON_WIDTH};
use crate::entities::{GameState, Rect, Ring, Shot};
use crate::tilemap::{Tile, TileMap};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_MUSIC: Color = Color::Magenta;
const C_ARCHER: Color = Color::White;
const C_ARROW: Color = Color::Cyan;
const C_BULLSEYE: Color = Color::Yellow;
const C_INNER_RING: Color = Color::Red;
const C_OUTER_RING: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Green;
const C_BUTTON: Color = Color::DarkGreen;

const CONTROLS: &str = "↑ ↓ / W S : Aim   SPACE : Shoot   Q : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world coordinates onto terminal cells.
///
/// Row 0 is the HUD and the last row the controls hint; the world is
/// stretched over the rows in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: i32,
    pub world_height: i32,
}

/// Half-open cell span `[col0, col1) × [row0, row1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

impl CellRect {
    pub fn width(&self) -> u16 {
        self.col1.saturating_sub(self.col0)
    }

    pub fn height(&self) -> u16 {
        self.row1.saturating_sub(self.row0)
    }
}

impl Viewport {
    const PLAY_TOP: u16 = 1;

    pub fn new(cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(3),
            world_width: world_width.max(1),
            world_height: world_height.max(1),
        }
    }

    /// Number of terminal rows the world occupies.
    pub fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// First row below the play area.
    pub fn play_bottom(&self) -> u16 {
        Self::PLAY_TOP + self.play_rows()
    }

    fn scale(v: i32, cells: u16, world: i32) -> i64 {
        i64::from(v) * i64::from(cells) / i64::from(world)
    }

    /// Column of world x, unclamped (may fall off either edge).
    pub fn col_of(&self, x: i32) -> i64 {
        Self::scale(x, self.cols, self.world_width)
    }

    /// Row of world y, unclamped.
    pub fn row_of(&self, y: i32) -> i64 {
        i64::from(Self::PLAY_TOP) + Self::scale(y, self.play_rows(), self.world_height)
    }

    /// Cells covered by a world rect, clipped to the play area and at least
    /// one cell on each axis.  `None` when entirely off screen.
    pub fn cells_of(&self, rect: &Rect) -> Option<CellRect> {
        let c0 = self.col_of(rect.x);
        let r0 = self.row_of(rect.y);
        let c1 = self.col_of(rect.right()).max(c0 + 1);
        let r1 = self.row_of(rect.bottom()).max(r0 + 1);

        let col0 = c0.max(0);
        let row0 = r0.max(i64::from(Self::PLAY_TOP));
        let col1 = c1.min(i64::from(self.cols));
        let row1 = r1.min(i64::from(self.play_bottom()));
        if col0 >= col1 || row0 >= row1 {
            return None;
        }
        Some(CellRect {
            col0: col0 as u16,
            row0: row0 as u16,
            col1: col1 as u16,
            row1: row1 as u16,
        })
    }

    /// World point at the centre of a terminal cell, or `None` outside
    /// the play area.
    pub fn to_world(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        if col >= self.cols || row < Self::PLAY_TOP || row >= self.play_bottom() {
            return None;
        }
        let rel_row = i64::from(row - Self::PLAY_TOP);
        let x = (2 * i64::from(col) + 1) * i64::from(self.world_width) / (2 * i64::from(self.cols));
        let y = (2 * rel_row + 1) * i64::from(self.world_height)
            / (2 * i64::from(self.play_rows()));
        Some((x as i32, y as i32))
    }
}

// ── Start screen ──────────────────────────────────────────────────────────────

/// The start button in world units.
pub fn start_button(world_width: i32, world_height: i32) -> Rect {
    Rect::new(
        world_width / 2 - START_BUTTON_WIDTH / 2,
        world_height / 2,
        START_BUTTON_WIDTH,
        START_BUTTON_HEIGHT,
    )
}

/// True when a click on terminal cell `(col, row)` lands on the button.
pub fn hits_start_button(viewport: &Viewport, col: u16, row: u16) -> bool {
    let button = start_button(viewport.world_width, viewport.world_height);
    if let Some(cells) = viewport.cells_of(&button) {
        // Any cell painted as button counts, even if its centre falls
        // just outside the world rect.
        if col >= cells.col0 && col < cells.col1 && row >= cells.row0 && row < cells.row1 {
            return true;
        }
    }
    viewport
        .to_world(col, row)
        .map(|(x, y)| button.contains_point(x, y))
        .unwrap_or(false)
}

/// Draw the title screen with its start button and present it.
pub fn draw_start_screen<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cx = viewport.cols / 2;
    let title = "➶  ARCHERY  ➶";
    let title_row = viewport.row_of(viewport.world_height / 4).max(0) as u16;
    print_centered(out, cx, title_row, title, C_TITLE)?;

    let button = start_button(viewport.world_width, viewport.world_height);
    if let Some(cells) = viewport.cells_of(&button) {
        out.queue(style::SetBackgroundColor(C_BUTTON))?;
        let blank = " ".repeat(cells.width() as usize);
        for row in cells.row0..cells.row1 {
            out.queue(cursor::MoveTo(cells.col0, row))?;
            out.queue(Print(&blank))?;
        }
        let label_row = cells.row0 + cells.height() / 2;
        print_centered(out, cx, label_row, "Start Game", Color::White)?;
        out.queue(style::SetBackgroundColor(Color::Reset))?;

        let help_row = cells.row1.saturating_add(1);
        print_centered(out, cx, help_row, "Click the button or press ENTER", C_HINT)?;
        print_centered(out, cx, help_row.saturating_add(1), CONTROLS, C_HINT)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw the field, the entities and the HUD, then flush.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    map: &TileMap,
    viewport: &Viewport,
    music: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_tile_map(out, map, viewport)?;
    draw_target(out, state, viewport)?;
    draw_archer(out, state, viewport)?;
    draw_arrow(out, state, viewport)?;
    draw_hud(out, state, viewport, music)?;
    draw_controls_hint(out, viewport)?;

    if state.is_over() {
        draw_game_over(out, state, viewport)?;
    }

    // Leave the cursor on the bottom row, outside the play field.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn tile_look(tile: Tile) -> (char, Color) {
    match tile {
        Tile::Grass => (',', Color::DarkGreen),
        Tile::TallGrass => ('"', Color::Green),
        Tile::Flower => ('*', Color::Magenta),
        Tile::Dirt => ('░', Color::DarkYellow),
        Tile::Stone => ('o', Color::Grey),
        Tile::Water => ('~', Color::Blue),
        Tile::Fence => ('#', Color::DarkYellow),
    }
}

fn draw_tile_map<W: Write>(out: &mut W, map: &TileMap, viewport: &Viewport) -> std::io::Result<()> {
    let tw = map.tile_width as i32;
    let th = map.tile_height as i32;
    for layer in map.visible_layers() {
        for (gx, gy, tile) in map.visible_tiles(layer) {
            let world = Rect::new(gx as i32 * tw, gy as i32 * th, tw, th);
            let Some(cells) = viewport.cells_of(&world) else {
                continue;
            };
            let (glyph, color) = tile_look(tile);
            out.queue(style::SetForegroundColor(color))?;
            let strip: String = std::iter::repeat(glyph).take(cells.width() as usize).collect();
            for row in cells.row0..cells.row1 {
                out.queue(cursor::MoveTo(cells.col0, row))?;
                out.queue(Print(&strip))?;
            }
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_target<W: Write>(out: &mut W, state: &GameState, viewport: &Viewport) -> std::io::Result<()> {
    let Some(cells) = viewport.cells_of(&state.target.rect()) else {
        return Ok(());
    };
    // Colour each cell by the innermost ring under its centre.
    for row in cells.row0..cells.row1 {
        out.queue(cursor::MoveTo(cells.col0, row))?;
        for col in cells.col0..cells.col1 {
            let ring = viewport
                .to_world(col, row)
                .and_then(|(x, y)| {
                    Ring::PRIORITY
                        .iter()
                        .copied()
                        .find(|r| state.target.zone(*r).contains_point(x, y))
                })
                .unwrap_or(Ring::Outer);
            let color = match ring {
                Ring::Bullseye => C_BULLSEYE,
                Ring::Inner => C_INNER_RING,
                Ring::Outer => C_OUTER_RING,
            };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print('█'))?;
        }
    }
    Ok(())
}

fn draw_archer<W: Write>(out: &mut W, state: &GameState, viewport: &Viewport) -> std::io::Result<()> {
    // Sprite (4 rows), clipped to the archer's cell height:
    //    O\
    //   /|_)
    //    |
    //   / \
    const SPRITE: [&str; 4] = [" O\\", "/|_)", " | ", "/ \\"];
    let Some(cells) = viewport.cells_of(&state.archer.rect()) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_ARCHER))?;
    for (i, line) in SPRITE.iter().take(cells.height() as usize).enumerate() {
        out.queue(cursor::MoveTo(cells.col0, cells.row0 + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_arrow<W: Write>(out: &mut W, state: &GameState, viewport: &Viewport) -> std::io::Result<()> {
    let rect = state.arrow.rect();
    let Some(cells) = viewport.cells_of(&rect) else {
        return Ok(());
    };
    // One row through the shaft's centre line.
    let row = viewport
        .row_of(rect.y + rect.h / 2)
        .clamp(i64::from(cells.row0), i64::from(cells.row1) - 1) as u16;
    let len = cells.width().max(2) as usize;
    let shaft = format!("{}►", "═".repeat(len - 1));
    out.queue(cursor::MoveTo(cells.col0, row))?;
    out.queue(style::SetForegroundColor(C_ARROW))?;
    out.queue(Print(shaft))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    viewport: &Viewport,
    music: bool,
) -> std::io::Result<()> {
    // Score and chances, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score: {}   Chances Left: {}",
        state.score, state.chances
    )))?;

    // Last shot, centre
    if let Some(shot) = state.last_shot {
        let (text, color) = match shot {
            Shot::Hit(ring) => (format!("{}! +{}", ring.label(), ring.points()), Color::Green),
            Shot::Miss => ("Miss".to_string(), Color::Red),
        };
        let lx = (viewport.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(lx, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }

    // Music, right
    if music {
        out.queue(cursor::MoveTo(viewport.cols.saturating_sub(3), 0))?;
        out.queue(style::SetForegroundColor(C_HUD_MUSIC))?;
        out.queue(Print("♪"))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, viewport.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, viewport: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("Q - Quit", Color::White),
    ];

    let cx = viewport.cols / 2;
    let start_row = (viewport.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, cx, start_row + i as u16, msg, *color)?;
    }

    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
