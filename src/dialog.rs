//! Dialog text table and the single on-screen dialog slot

use serde::{Deserialize, Serialize};

use crate::sim::timer::PausableTimer;

/// Every dialog the game can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogId {
    EmptyStorage,
    StorageSuccess,
    BombExploded,
    TimeAdded,
    SuperFoodCollected,
}

impl DialogId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogId::EmptyStorage => "empty_storage",
            DialogId::StorageSuccess => "storage_success",
            DialogId::BombExploded => "bomb_exploded",
            DialogId::TimeAdded => "time_added",
            DialogId::SuperFoodCollected => "super_food_collected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "empty_storage" => Some(DialogId::EmptyStorage),
            "storage_success" => Some(DialogId::StorageSuccess),
            "bomb_exploded" => Some(DialogId::BombExploded),
            "time_added" => Some(DialogId::TimeAdded),
            "super_food_collected" => Some(DialogId::SuperFoodCollected),
            _ => None,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            DialogId::EmptyStorage => "You have no grain to store",
            DialogId::StorageSuccess => "Storage complete!",
            DialogId::BombExploded => "The bomb went off!",
            DialogId::TimeAdded => "Time added!",
            DialogId::SuperFoodCollected => "Golden grain! Load is full!",
        }
    }
}

/// Display text for a dialog id; unknown ids read as empty
pub fn text(id: &str) -> &'static str {
    DialogId::parse(id).map(|id| id.text()).unwrap_or("")
}

/// One dialog at a time; showing a new one replaces the old.
///
/// The display timer runs on the wall clock and is never paused, so a
/// notification raised just before a pause still clears on schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dialog {
    id: Option<DialogId>,
    timer: PausableTimer,
}

impl Dialog {
    pub fn show(&mut self, id: DialogId, duration_ms: u64, now: u64) {
        self.timer = PausableTimer::started(now, duration_ms);
        self.id = Some(id);
    }

    /// Hide the dialog once its display time is over
    pub fn update(&mut self, now: u64) {
        if self.id.is_some() && self.timer.elapsed(now) > self.timer.duration() {
            self.id = None;
            self.timer.cancel();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.id.is_some()
    }

    pub fn current_id(&self) -> Option<DialogId> {
        self.id
    }

    pub fn text(&self) -> &'static str {
        self.id.map(|id| id.text()).unwrap_or("")
    }
}
