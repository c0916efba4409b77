/// Archery rules as state transitions.
///
/// Each transition borrows a `GameState` and hands back the next one.
/// No terminal, clock or audio access happens here.

use crate::constants::{
    ARCHER_SIZE, ARCHER_STEP, ARCHER_X, ARROW_OFFSET_X, ARROW_OFFSET_Y, ARROW_SPEED,
    STARTING_CHANCES, TARGET_RIGHT_MARGIN, TARGET_SIZE, TARGET_SPEED,
};
use crate::entities::{
    Archer, Arrow, GameState, GameStatus, Rect, Ring, Shot, Target,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a world of the given size.
pub fn init_state(width: i32, height: i32) -> GameState {
    let archer = Archer {
        x: ARCHER_X,
        y: height / 2 - ARCHER_SIZE / 2,
    };
    let arrow = resting_arrow(&archer);
    GameState {
        archer,
        arrow,
        target: Target {
            x: width - TARGET_RIGHT_MARGIN,
            y: height / 2 - TARGET_SIZE / 2,
            direction: 1,
        },
        score: 0,
        chances: STARTING_CHANCES,
        last_shot: None,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

/// An arrow nocked on the bow: not in flight, positioned on the archer.
fn resting_arrow(archer: &Archer) -> Arrow {
    Arrow {
        x: archer.x + ARROW_OFFSET_X,
        y: archer.y + ARROW_OFFSET_Y,
        in_flight: false,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn move_archer_by(state: &GameState, dy: i32) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let max_y = (state.height - ARCHER_SIZE).max(0);
    let archer = Archer {
        y: (state.archer.y + dy).clamp(0, max_y),
        ..state.archer.clone()
    };
    // A nocked arrow travels with the bow; a loosed one keeps its line.
    let arrow = if state.arrow.in_flight {
        state.arrow.clone()
    } else {
        resting_arrow(&archer)
    };
    GameState {
        archer,
        arrow,
        ..state.clone()
    }
}

pub fn move_archer_up(state: &GameState) -> GameState {
    move_archer_by(state, -ARCHER_STEP)
}

pub fn move_archer_down(state: &GameState) -> GameState {
    move_archer_by(state, ARCHER_STEP)
}

/// Loose the arrow, or `None` while one is already in flight or the game
/// is over.
pub fn loose_arrow(state: &GameState) -> Option<GameState> {
    if state.arrow.in_flight || state.is_over() {
        return None;
    }
    Some(GameState {
        arrow: Arrow {
            in_flight: true,
            ..resting_arrow(&state.archer)
        },
        ..state.clone()
    })
}

/// Like [`loose_arrow`], returning the state unchanged when nothing launches.
pub fn fire_arrow(state: &GameState) -> GameState {
    loose_arrow(state).unwrap_or_else(|| state.clone())
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// The highest-priority ring `arrow` overlaps, if any.
pub fn scoring_ring(arrow: &Rect, target: &Target) -> Option<Ring> {
    Ring::PRIORITY
        .iter()
        .copied()
        .find(|ring| arrow.intersects(&target.zone(*ring)))
}

// ── Per-frame simulation ─────────────────────────────────────────────────────

/// Move the target one step and reflect it at the vertical bounds.
///
/// The position is clamped to `[0, height - TARGET_SIZE]` and the direction
/// flips on the frame the target lands on the bound it was heading for.
pub fn step_target(state: &GameState) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let t = &state.target;
    let max_y = (state.height - TARGET_SIZE).max(0);
    let y = (t.y + TARGET_SPEED * t.direction).clamp(0, max_y);
    let at_bound = (y == 0 && t.direction < 0) || (y == max_y && t.direction > 0);
    let direction = if at_bound { -t.direction } else { t.direction };
    GameState {
        target: Target { y, direction, ..t.clone() },
        ..state.clone()
    }
}

/// Advance an in-flight arrow, then resolve hits, misses and game over.
pub fn step_arrow(state: &GameState) -> GameState {
    if state.is_over() || !state.arrow.in_flight {
        return state.clone();
    }

    let mut arrow = Arrow {
        x: state.arrow.x + ARROW_SPEED,
        ..state.arrow.clone()
    };
    let mut score = state.score;
    let mut chances = state.chances;
    let mut last_shot = state.last_shot;
    let mut status = state.status;

    match scoring_ring(&arrow.rect(), &state.target) {
        Some(ring) => {
            score += ring.points();
            last_shot = Some(Shot::Hit(ring));
            arrow.in_flight = false;
        }
        None if arrow.x > state.width => {
            chances = chances.saturating_sub(1);
            last_shot = Some(Shot::Miss);
            arrow.in_flight = false;
            if chances == 0 {
                status = GameStatus::GameOver;
            }
        }
        None => {}
    }

    if !arrow.in_flight {
        arrow = resting_arrow(&state.archer);
    }

    GameState {
        arrow,
        score,
        chances,
        last_shot,
        status,
        ..state.clone()
    }
}

/// Advance the simulation by one frame: target first, then the arrow
/// against the target's new position.
pub fn tick(state: &GameState) -> GameState {
    let next = step_arrow(&step_target(state));
    GameState {
        frame: state.frame + 1,
        ..next
    }
}
