//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as an explicit `now` (ms since session start)
//! - Seeded RNG only
//! - Fixed per-tick item motion
//! - No rendering or platform dependencies

pub mod collision;
pub mod item;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::Rect;
pub use item::{CollectTarget, Item, ItemKind};
pub use session::Session;
pub use spawner::ItemManager;
pub use state::{DepositOutcome, GameEvent, GameState, Player, PlayerState};
pub use tick::{TickInput, tick};
pub use timer::PausableTimer;
