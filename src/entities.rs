/// All game entity types: pure data, no per-frame logic.

use crate::constants::{
    ARCHER_SIZE, ARROW_HEIGHT, ARROW_WIDTH, BULLSEYE_INSET, BULLSEYE_POINTS, BULLSEYE_SIZE,
    INNER_RING_INSET, INNER_RING_POINTS, INNER_RING_SIZE, OUTER_RING_POINTS, TARGET_SIZE,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when the interiors overlap.  Rects that only share an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Half-open containment: the left/top edges are inside, the
    /// right/bottom edges are not.
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// A rect shrunk by `inset` on the top-left, with the given square size.
    pub fn inset_square(&self, inset: i32, size: i32) -> Rect {
        Rect::new(self.x + inset, self.y + inset, size, size)
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// One of the three nested scoring zones, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ring {
    Bullseye,
    Inner,
    Outer,
}

impl Ring {
    /// Collision priority order: the smallest zone is checked first.
    pub const PRIORITY: [Ring; 3] = [Ring::Bullseye, Ring::Inner, Ring::Outer];

    pub fn points(&self) -> u32 {
        match self {
            Ring::Bullseye => BULLSEYE_POINTS,
            Ring::Inner => INNER_RING_POINTS,
            Ring::Outer => OUTER_RING_POINTS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ring::Bullseye => "BULLSEYE",
            Ring::Inner => "Inner ring",
            Ring::Outer => "Outer ring",
        }
    }
}

/// How the most recent flight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shot {
    Hit(Ring),
    Miss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Archer, arrow & target ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Archer {
    pub x: i32,
    pub y: i32,
}

impl Archer {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ARCHER_SIZE, ARCHER_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub x: i32,
    pub y: i32,
    pub in_flight: bool,
}

impl Arrow {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ARROW_WIDTH, ARROW_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: i32,
    pub y: i32,
    /// +1 moving down, -1 moving up.
    pub direction: i32,
}

impl Target {
    /// Outer bounds of the target; also the outer scoring zone.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, TARGET_SIZE, TARGET_SIZE)
    }

    /// The zone rectangle for `ring` at the target's current position.
    pub fn zone(&self, ring: Ring) -> Rect {
        let outer = self.rect();
        match ring {
            Ring::Bullseye => outer.inset_square(BULLSEYE_INSET, BULLSEYE_SIZE),
            Ring::Inner => outer.inset_square(INNER_RING_INSET, INNER_RING_SIZE),
            Ring::Outer => outer,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one frame of play depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub archer: Archer,
    pub arrow: Arrow,
    pub target: Target,
    pub score: u32,
    pub chances: u32,
    /// Outcome of the last finished flight, for HUD feedback.
    pub last_shot: Option<Shot>,
    pub status: GameStatus,
    pub frame: u64,
    /// World size in world units.
    pub width: i32,
    pub height: i32,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
