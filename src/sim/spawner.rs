//! Item spawning, physics and pickup
//!
//! Spawns happen on a variable cadence: after each spawn a fresh interval
//! is drawn from the tuning range. A special item is always followed by
//! plain food so hazards and bonuses never come back to back.

use glam::Vec2;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::item::{Item, ItemKind};
use super::state::{GameEvent, GameState};
use crate::tuning::{Tuning, TuningError};

/// Owns every live item
#[derive(Debug, Clone)]
pub struct ItemManager {
    /// Live items in spawn order
    pub items: Vec<Item>,
    last_spawn_ms: u64,
    spawn_interval_ms: u64,
    last_kind: Option<ItemKind>,
    kind_index: WeightedIndex<f32>,
    rng: Pcg32,
    next_id: u32,
}

impl ItemManager {
    /// Fails if `tuning` does not validate; every range is sampled later
    pub fn new(tuning: &Tuning, seed: u64, now: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut manager = Self {
            items: Vec::new(),
            last_spawn_ms: now,
            spawn_interval_ms: 0,
            last_kind: None,
            kind_index: tuning.spawn_weights.index()?,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        manager.reset_spawn_interval(tuning);
        Ok(manager)
    }

    /// Drop every item and reseed, keeping the validated spawn table
    pub fn reset(&mut self, tuning: &Tuning, seed: u64, now: u64) {
        self.items.clear();
        self.last_spawn_ms = now;
        self.last_kind = None;
        self.rng = Pcg32::seed_from_u64(seed);
        self.next_id = 1;
        self.reset_spawn_interval(tuning);
    }

    pub fn last_kind(&self) -> Option<ItemKind> {
        self.last_kind
    }

    pub fn spawn_interval_ms(&self) -> u64 {
        self.spawn_interval_ms
    }

    /// Spawn, move, collect and prune; one call per unpaused frame
    pub fn update(&mut self, state: &mut GameState, tuning: &Tuning, now: u64) {
        self.handle_spawning(state, tuning, now);
        self.update_items(state, tuning, now);
        self.items.retain(|item| item.active);
    }

    /// Add an item at `pos` and return its id
    pub fn push(&mut self, kind: ItemKind, pos: Vec2, fall_speed: f32, size: f32, now: u64) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Item::new(id, kind, pos, fall_speed, size, now));
        id
    }

    fn reset_spawn_interval(&mut self, tuning: &Tuning) {
        let (min, max) = tuning.spawn_interval_range_ms;
        self.spawn_interval_ms = self.rng.random_range(min..=max);
    }

    fn choose_kind(&mut self) -> ItemKind {
        if self.last_kind.is_some_and(|kind| kind.is_special()) {
            return ItemKind::Food;
        }
        ItemKind::ALL[self.kind_index.sample(&mut self.rng)]
    }

    fn handle_spawning(&mut self, state: &mut GameState, tuning: &Tuning, now: u64) {
        if now.saturating_sub(self.last_spawn_ms) <= self.spawn_interval_ms {
            return;
        }

        let kind = self.choose_kind();
        let (x_min, x_max) = tuning.spawn_x_range;
        let x = self.rng.random_range(x_min..=x_max) as f32;
        let (speed_min, speed_max) = tuning.fall_speed_range;
        let fall_speed = self.rng.random_range(speed_min..=speed_max) as f32;

        let id = self.push(kind, Vec2::new(x, 0.0), fall_speed, tuning.item_size, now);
        log::debug!("Spawned {:?} #{} at x={} speed={}", kind, id, x, fall_speed);
        state.push_event(GameEvent::ItemSpawned { id, kind });

        self.last_kind = Some(kind);
        self.last_spawn_ms = now;
        self.reset_spawn_interval(tuning);
    }

    fn update_items(&mut self, state: &mut GameState, tuning: &Tuning, now: u64) {
        for item in self.items.iter_mut().filter(|item| item.active) {
            item.update();

            if item.check_collision(&state.player, state.is_storing(), tuning.item_hitbox_scale) {
                item.on_collect(state, tuning, now);
                log::debug!("Collected {:?} #{}", item.kind, item.id);
                state.push_event(GameEvent::ItemCollected {
                    id: item.id,
                    kind: item.kind,
                });
            }

            if item.active && item.has_landed(tuning.screen_height) {
                item.active = false;
                state.push_event(GameEvent::ItemMissed {
                    id: item.id,
                    kind: item.kind,
                });
            }
        }
    }
}
