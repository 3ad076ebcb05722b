//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one frame. Each frame runs
//! in a fixed order: input intake, timer bookkeeping, movement and the
//! deposit trigger, then items. Rendering is left to the host.

use super::item::ItemKind;
use super::spawner::ItemManager;
use super::state::GameState;
use crate::tuning::Tuning;

/// Autopilot heads home with whatever it carries once this little time is left
const AUTOPILOT_LAST_CALL_MS: u64 = 10_000;
/// How far above the player a bomb counts as a threat
const AUTOPILOT_BOMB_LOOKAHEAD: f32 = 150.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held left
    pub move_left: bool,
    /// Held right
    pub move_right: bool,
    /// Held deposit (store grain when inside the bin)
    pub deposit: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game by one frame at time `now` (ms since session start)
///
/// Events are appended to `state.events` and never cleared here; a host
/// driving `tick` directly must take them each frame, as
/// [`super::session::Session::advance`] callers do via `drain_events`.
pub fn tick(state: &mut GameState, items: &mut ItemManager, input: &TickInput, tuning: &Tuning, now: u64) {
    // Handle pause toggle
    if input.pause {
        state.toggle_pause();
    }

    // Pause flags are re-read every frame, so timers catch up even if a
    // frame was skipped
    state.update_timers(tuning, now);

    // Don't touch the world if paused or game over
    if state.paused || state.game_over {
        return;
    }

    let input = if input.autopilot {
        autopilot(state, items, now)
    } else {
        input.clone()
    };

    if state.can_move() {
        state.player.steer(input.move_left, input.move_right, tuning.screen_width);
        state.in_storage_zone = state.player.hitbox().overlaps(&state.storage_zone);
        if state.in_storage_zone && input.deposit {
            state.try_deposit(tuning, now);
        }
    }

    items.update(state, tuning, now);
}

/// Synthesize input from the current state
fn autopilot(state: &GameState, items: &ItemManager, now: u64) -> TickInput {
    let mut input = TickInput::default();
    let player = &state.player;
    let center_x = player.center().x;

    // Step out from under a falling bomb before anything else
    let threat = items
        .items
        .iter()
        .filter(|item| item.active && item.kind == ItemKind::Bomb)
        .filter(|item| item.pos.y < player.pos.y && item.pos.y > player.pos.y - AUTOPILOT_BOMB_LOOKAHEAD)
        .find(|item| (item.pos.x - center_x).abs() < player.size.x);
    if let Some(bomb) = threat {
        if bomb.pos.x >= center_x {
            input.move_left = true;
        } else {
            input.move_right = true;
        }
        return input;
    }

    let last_call = state.remaining_ms(now) < AUTOPILOT_LAST_CALL_MS;
    let head_home =
        state.current_weight >= state.max_weight || (state.current_weight > 0 && last_call);

    let target_x = if head_home {
        if player.hitbox().overlaps(&state.storage_zone) {
            input.deposit = true;
            return input;
        }
        Some(state.storage_zone.center().x)
    } else {
        // Lowest catchable non-bomb item
        let catch_line = player.pos.y + player.size.y;
        items
            .items
            .iter()
            .filter(|item| item.active && item.kind != ItemKind::Bomb && item.pos.y < catch_line)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|item| item.pos.x)
    };

    if let Some(x) = target_x {
        let dx = x - center_x;
        if dx.abs() > player.speed {
            input.move_left = dx < 0.0;
            input.move_right = dx > 0.0;
        }
    }
    input
}
