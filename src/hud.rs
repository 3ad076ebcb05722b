//! Read-only view of a frame for renderers and UI
//!
//! Nothing here feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::dialog::DialogId;
use crate::sim::item::ItemKind;
use crate::sim::spawner::ItemManager;
use crate::sim::state::{GameState, PlayerState};

#[derive(Debug, Clone, Serialize)]
pub struct DialogView {
    pub id: DialogId,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub state: PlayerState,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: f32,
}

/// Everything the HUD and scene draw for one frame
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub remaining_secs: u64,
    pub score: u32,
    pub current_weight: u32,
    pub max_weight: u32,
    /// Storage progress in `[0, 1]` while storing
    pub storing: Option<f32>,
    /// Stun progress in `[0, 1]` while stunned
    pub stunned: Option<f32>,
    pub dialog: Option<DialogView>,
    /// Player stands in the grain bin
    pub show_store_prompt: bool,
    pub paused: bool,
    pub game_over: bool,
    pub player: PlayerView,
    pub items: Vec<ItemView>,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, items: &ItemManager, now: u64) -> Self {
        Self {
            remaining_secs: state.remaining_secs(now),
            score: state.score,
            current_weight: state.current_weight,
            max_weight: state.max_weight,
            storing: state.is_storing().then(|| state.storing.progress(now)),
            stunned: state.is_stunned().then(|| state.stunned.progress(now)),
            dialog: state.dialog.current_id().map(|id| DialogView { id, text: id.text() }),
            show_store_prompt: state.in_storage_zone,
            paused: state.paused,
            game_over: state.game_over,
            player: PlayerView {
                pos: state.player.pos,
                size: state.player.size,
                state: state.player.state,
            },
            items: items
                .items
                .iter()
                .filter(|item| item.active)
                .map(|item| ItemView {
                    kind: item.kind,
                    pos: item.pos,
                    size: item.size,
                })
                .collect(),
        }
    }
}
