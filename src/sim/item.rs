//! Falling items and their collection effects

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Player;
use crate::dialog::DialogId;
use crate::tuning::Tuning;

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// One unit of grain
    Food,
    /// Stuns the player
    Bomb,
    /// Adds time to the match
    Clock,
    /// Fills the load to capacity
    SuperFood,
}

impl ItemKind {
    /// Every kind, in spawn-table order
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Food,
        ItemKind::Bomb,
        ItemKind::Clock,
        ItemKind::SuperFood,
    ];

    /// Anything other than plain food
    pub fn is_special(&self) -> bool {
        *self != ItemKind::Food
    }
}

/// The slice of game state an item effect may touch
pub trait CollectTarget {
    /// Add carried weight, silently capped at capacity
    fn add_weight(&mut self, amount: u32);
    /// Set carried weight to capacity
    fn fill_weight(&mut self);
    /// Start a stun; ignored if one is already running
    fn stun_player(&mut self, duration_ms: u64, now: u64) -> bool;
    /// Add (or with a negative value, remove) whole seconds of match time
    fn add_match_time(&mut self, seconds: i64, now: u64);
    fn show_dialog(&mut self, id: DialogId, duration_ms: u64, now: u64);
}

/// A falling item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Center of the item
    pub pos: Vec2,
    /// Pixels per tick
    pub fall_speed: f32,
    /// Nominal side length
    pub size: f32,
    pub active: bool,
    pub spawn_ms: u64,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2, fall_speed: f32, size: f32, now: u64) -> Self {
        Self {
            id,
            kind,
            pos,
            fall_speed,
            size,
            active: true,
            spawn_ms: now,
        }
    }

    /// Advance one fixed step
    pub fn update(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// Pickup box: the nominal box scaled by `scale` around the center
    pub fn hitbox(&self, scale: f32) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.size)).scaled(scale)
    }

    /// Whether the player catches this item right now.
    ///
    /// A stunned player, or one busy storing, cannot catch anything.
    pub fn check_collision(&self, player: &Player, storing: bool, hitbox_scale: f32) -> bool {
        if player.is_stunned() || storing {
            return false;
        }
        player.hitbox().overlaps(&self.hitbox(hitbox_scale))
    }

    /// Whether the item has reached the bottom of the screen
    pub fn has_landed(&self, screen_height: f32) -> bool {
        self.pos.y >= screen_height - self.size / 2.0
    }

    /// Deactivate and apply the kind's effect
    pub fn on_collect<T: CollectTarget + ?Sized>(&mut self, target: &mut T, tuning: &Tuning, now: u64) {
        self.active = false;
        match self.kind {
            ItemKind::Food => target.add_weight(1),
            ItemKind::Bomb => {
                if target.stun_player(tuning.stun_duration_ms, now) {
                    target.show_dialog(DialogId::BombExploded, tuning.dialog_duration_ms, now);
                }
            }
            ItemKind::Clock => {
                target.add_match_time(tuning.clock_bonus_secs, now);
                target.show_dialog(DialogId::TimeAdded, tuning.dialog_duration_ms, now);
            }
            ItemKind::SuperFood => {
                target.fill_weight();
                target.show_dialog(DialogId::SuperFoodCollected, tuning.dialog_duration_ms, now);
            }
        }
    }
}
