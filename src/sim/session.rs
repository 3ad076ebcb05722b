//! One play session: tuning, game state and items under a single owner

use super::spawner::ItemManager;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::hud::HudSnapshot;
use crate::tuning::{Tuning, TuningError};

/// Top-level owner driven by the host loop
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub state: GameState,
    pub items: ItemManager,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64, now: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = GameState::new(&tuning, now);
        let items = ItemManager::new(&tuning, seed, now)?;
        log::info!(
            "Session started with seed {} ({}s match, capacity {})",
            seed,
            tuning.match_duration_secs,
            tuning.max_weight
        );
        Ok(Self {
            tuning,
            seed,
            state,
            items,
        })
    }

    /// Run one frame
    pub fn advance(&mut self, input: &TickInput, now: u64) {
        tick(&mut self.state, &mut self.items, input, &self.tuning, now);
    }

    /// Throw the current match away and start over from `now`
    pub fn restart(&mut self, seed: u64, now: u64) {
        self.seed = seed;
        self.state = GameState::new(&self.tuning, now);
        self.items.reset(&self.tuning, seed, now);
        log::info!("Session restarted with seed {}", seed);
    }

    /// Events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn hud(&self, now: u64) -> HudSnapshot {
        HudSnapshot::capture(&self.state, &self.items, now)
    }
}
