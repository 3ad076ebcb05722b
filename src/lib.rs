//! Grain Catcher - a single-screen catch-and-store arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, items, game state, tick)
//! - `tuning`: Data-driven game balance
//! - `dialog`: Dialog text table
//! - `hud`: Read-only snapshot consumed by renderers

pub mod dialog;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use hud::HudSnapshot;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`]. Anything the
/// simulation reads at runtime goes through `Tuning` instead.
pub mod consts {
    /// Target update rate; item physics advance a fixed step per update
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Match length in seconds
    pub const GAME_DURATION_SECS: u64 = 120;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Carry capacity
    pub const MAX_WEIGHT: u32 = 5;

    /// Grain bin (storage zone), sitting on the ground at the left edge
    pub const GRAIN_BIN_X: f32 = 20.0;
    pub const GRAIN_BIN_WIDTH: f32 = 100.0;
    pub const GRAIN_BIN_HEIGHT: f32 = 100.0;
    pub const GRAIN_BIN_Y: f32 = SCREEN_HEIGHT - GROUND_HEIGHT - GRAIN_BIN_HEIGHT;

    /// Storage duration (ms) per carried weight, index = weight
    pub const STORE_DURATIONS_MS: [u64; 6] = [0, 1000, 1500, 2000, 2500, 3000];
    /// Score awarded per carried weight, index = weight
    pub const STORE_SCORES: [u32; 6] = [0, 1, 3, 6, 10, 15];

    /// Item defaults
    pub const ITEM_SIZE: f32 = 30.0;
    /// Fraction of the nominal item size used for pickup
    pub const ITEM_HITBOX_SCALE: f32 = 0.8;
    pub const ITEM_FALL_SPEED_RANGE: (u32, u32) = (2, 5);
    pub const ITEM_SPAWN_INTERVAL_RANGE_MS: (u64, u64) = (500, 1500);
    pub const ITEM_SPAWN_X_RANGE: (u32, u32) = (50, 750);

    /// Relative spawn weights (normalized at load)
    pub const SPAWN_WEIGHT_FOOD: f32 = 0.70;
    pub const SPAWN_WEIGHT_BOMB: f32 = 0.15;
    pub const SPAWN_WEIGHT_CLOCK: f32 = 0.10;
    pub const SPAWN_WEIGHT_SUPER_FOOD: f32 = 0.05;

    /// Bomb stun length
    pub const STUN_DURATION_MS: u64 = 2000;
    /// Seconds a clock adds to the match countdown
    pub const CLOCK_BONUS_SECS: i64 = 10;

    /// Default on-screen time for dialogs
    pub const DIALOG_DURATION_MS: u64 = 1000;
}
