//! Data-driven game balance
//!
//! Loaded once at startup from JSON (any missing field keeps its default
//! from [`crate::consts`]) and validated before a session is built.

use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::item::ItemKind;

/// Reasons a tuning file is rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_weight must be at least 1")]
    ZeroCapacity,
    #[error("match duration must be positive")]
    ZeroMatchDuration,
    #[error("{table} has {len} entries, expected {expected} (max_weight + 1)")]
    TableLength {
        table: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        name: &'static str,
        min: u64,
        max: u64,
    },
    #[error("items must fall at least 1px per tick")]
    ZeroFallSpeed,
    #[error("spawn weights unusable: {0}")]
    SpawnWeights(#[from] rand::distr::weighted::Error),
}

/// Relative spawn chance per item kind; normalized when sampled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnWeights {
    pub food: f32,
    pub bomb: f32,
    pub clock: f32,
    pub super_food: f32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            food: SPAWN_WEIGHT_FOOD,
            bomb: SPAWN_WEIGHT_BOMB,
            clock: SPAWN_WEIGHT_CLOCK,
            super_food: SPAWN_WEIGHT_SUPER_FOOD,
        }
    }
}

impl SpawnWeights {
    pub fn weight_of(&self, kind: ItemKind) -> f32 {
        match kind {
            ItemKind::Food => self.food,
            ItemKind::Bomb => self.bomb,
            ItemKind::Clock => self.clock,
            ItemKind::SuperFood => self.super_food,
        }
    }

    /// Sampler over [`ItemKind::ALL`]
    pub fn index(&self) -> Result<WeightedIndex<f32>, TuningError> {
        Ok(WeightedIndex::new(ItemKind::ALL.map(|kind| self.weight_of(kind)))?)
    }
}

/// All balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,

    // === Match ===
    pub match_duration_secs: u64,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Pixels moved per tick
    pub player_speed: f32,
    pub max_weight: u32,

    // === Storage ===
    pub storage_zone: Rect,
    /// Indexed by carried weight, entry 0 unused
    pub store_durations_ms: Vec<u64>,
    /// Indexed by carried weight, entry 0 unused
    pub store_scores: Vec<u32>,

    // === Items ===
    pub item_size: f32,
    pub item_hitbox_scale: f32,
    pub fall_speed_range: (u32, u32),
    pub spawn_interval_range_ms: (u64, u64),
    pub spawn_x_range: (u32, u32),
    pub spawn_weights: SpawnWeights,

    // === Effects ===
    pub stun_duration_ms: u64,
    pub clock_bonus_secs: i64,
    pub dialog_duration_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,

            match_duration_secs: GAME_DURATION_SECS,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            max_weight: MAX_WEIGHT,

            storage_zone: Rect::new(GRAIN_BIN_X, GRAIN_BIN_Y, GRAIN_BIN_WIDTH, GRAIN_BIN_HEIGHT),
            store_durations_ms: STORE_DURATIONS_MS.to_vec(),
            store_scores: STORE_SCORES.to_vec(),

            item_size: ITEM_SIZE,
            item_hitbox_scale: ITEM_HITBOX_SCALE,
            fall_speed_range: ITEM_FALL_SPEED_RANGE,
            spawn_interval_range_ms: ITEM_SPAWN_INTERVAL_RANGE_MS,
            spawn_x_range: ITEM_SPAWN_X_RANGE,
            spawn_weights: SpawnWeights::default(),

            stun_duration_ms: STUN_DURATION_MS,
            clock_bonus_secs: CLOCK_BONUS_SECS,
            dialog_duration_ms: DIALOG_DURATION_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_weight == 0 {
            return Err(TuningError::ZeroCapacity);
        }
        if self.match_duration_secs == 0 {
            return Err(TuningError::ZeroMatchDuration);
        }

        let expected = self.max_weight as usize + 1;
        for (table, len) in [
            ("store_durations_ms", self.store_durations_ms.len()),
            ("store_scores", self.store_scores.len()),
        ] {
            if len != expected {
                return Err(TuningError::TableLength { table, len, expected });
            }
        }

        let ranges = [
            ("fall_speed_range", self.fall_speed_range.0 as u64, self.fall_speed_range.1 as u64),
            ("spawn_interval_range_ms", self.spawn_interval_range_ms.0, self.spawn_interval_range_ms.1),
            ("spawn_x_range", self.spawn_x_range.0 as u64, self.spawn_x_range.1 as u64),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange { name, min, max });
            }
        }
        if self.fall_speed_range.0 == 0 {
            return Err(TuningError::ZeroFallSpeed);
        }

        self.spawn_weights.index()?;
        Ok(())
    }

    pub fn match_duration_ms(&self) -> u64 {
        self.match_duration_secs.saturating_mul(1000)
    }

    /// Storage time for carrying `weight` items
    pub fn store_duration_ms(&self, weight: u32) -> u64 {
        self.store_durations_ms.get(weight as usize).copied().unwrap_or(0)
    }

    /// Points for storing `weight` items
    pub fn store_score(&self, weight: u32) -> u32 {
        self.store_scores.get(weight as usize).copied().unwrap_or(0)
    }

    /// Top-left corner of the player at match start: centered, standing on the ground
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(
            (self.screen_width - self.player_width) / 2.0,
            self.screen_height - self.ground_height - self.player_height,
        )
    }
}
