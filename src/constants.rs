// World (simulation) size in world units
pub const WORLD_WIDTH: i32 = 800;
pub const WORLD_HEIGHT: i32 = 600;

// Frame timing
pub const DEFAULT_FPS: u32 = 60;

// Archer
pub const ARCHER_X: i32 = 100;
pub const ARCHER_SIZE: i32 = 100;
pub const ARCHER_STEP: i32 = 5;

// Arrow, resting offset is relative to the archer's top-left corner
pub const ARROW_WIDTH: i32 = 60;
pub const ARROW_HEIGHT: i32 = 20;
pub const ARROW_SPEED: i32 = 15;
pub const ARROW_OFFSET_X: i32 = 50;
pub const ARROW_OFFSET_Y: i32 = 40;

// Target, x is measured back from the right edge
pub const TARGET_SIZE: i32 = 100;
pub const TARGET_RIGHT_MARGIN: i32 = 200;
pub const TARGET_SPEED: i32 = 3;

// Rings, insets are from the target's top-left corner
pub const BULLSEYE_INSET: i32 = 35;
pub const BULLSEYE_SIZE: i32 = 30;
pub const INNER_RING_INSET: i32 = 20;
pub const INNER_RING_SIZE: i32 = 60;

pub const BULLSEYE_POINTS: u32 = 100;
pub const INNER_RING_POINTS: u32 = 75;
pub const OUTER_RING_POINTS: u32 = 50;

pub const STARTING_CHANCES: u32 = 5;

// Start screen button, centred horizontally just below mid-screen
pub const START_BUTTON_WIDTH: i32 = 200;
pub const START_BUTTON_HEIGHT: i32 = 60;

// Tile map
pub const DEFAULT_TILE_SIZE: u32 = 32;
