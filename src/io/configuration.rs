//! Model constants and runtime configuration defaults

// Tile set limits
/// Highest tile value with a known shape
pub const MAX_TILE_VALUE: usize = 9;

// Board limits
/// Smallest grid that fits a tile in every orientation
pub const MIN_GRID_SIZE: usize = 6;
/// Largest supported grid side
pub const MAX_GRID_SIZE: usize = 64;

// Default values for configurable parameters
/// Default highest tile value
pub const DEFAULT_MAX_VALUE: usize = 9;
/// Default copies of each value
pub const DEFAULT_COPIES: usize = 2;
/// Default number of deck slots
pub const DEFAULT_DECK_SIZE: usize = 20;
/// Default grid side
pub const DEFAULT_GRID_SIZE: usize = 20;
/// Default number of levels
pub const DEFAULT_MAX_LAYERS: usize = 7;
/// Fixed seed for reproducible known decks
pub const DEFAULT_SEED: u64 = 42;

// Search reporting
/// Minimum time between progress log lines, in milliseconds
pub const LOG_INTERVAL_MS: u64 = 1000;
/// Node mask deciding when the log monitor reads the clock
pub const LOG_CLOCK_CHECK_MASK: u64 = 255;
/// Nodes between progress display refreshes
pub const PROGRESS_REFRESH_NODES: u64 = 64;

// Output settings
/// Pixel size of one board cell in exported images
pub const CELL_PIXELS: u32 = 16;
/// File name prefix of exported level images
pub const LEVEL_IMAGE_PREFIX: &str = "level_";
