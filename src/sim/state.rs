//! Game state and core simulation types
//!
//! `GameState` owns the player, the weight inventory and the three
//! gameplay timers (match, storing, stun) plus the dialog slot. Items live
//! in the [`super::spawner::ItemManager`] and reach this state only through
//! [`CollectTarget`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::item::{CollectTarget, ItemKind};
use super::timer::PausableTimer;
use crate::dialog::{Dialog, DialogId};
use crate::tuning::Tuning;

/// What the player is doing, drives animation on the render side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    MovingLeft,
    MovingRight,
    Stunned,
}

/// The catcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub state: PlayerState,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size,
            speed,
            state: PlayerState::Idle,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.hitbox().center()
    }

    pub fn is_stunned(&self) -> bool {
        self.state == PlayerState::Stunned
    }

    pub fn stun(&mut self) {
        self.state = PlayerState::Stunned;
    }

    /// Back to standing still after a stun
    pub fn recover(&mut self) {
        self.state = PlayerState::Idle;
    }

    /// Apply one tick of horizontal input, clamped to the screen
    pub fn steer(&mut self, left: bool, right: bool, screen_width: f32) {
        if self.is_stunned() {
            return;
        }
        let direction = right as i32 - left as i32;
        self.state = match direction {
            -1 => PlayerState::MovingLeft,
            1 => PlayerState::MovingRight,
            _ => PlayerState::Idle,
        };
        let max_x = (screen_width - self.size.x).max(0.0);
        self.pos.x = (self.pos.x + direction as f32 * self.speed).clamp(0.0, max_x);
    }
}

/// Gameplay notifications, drained by the host once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemSpawned { id: u32, kind: ItemKind },
    ItemCollected { id: u32, kind: ItemKind },
    ItemMissed { id: u32, kind: ItemKind },
    StoreStarted { weight: u32, duration_ms: u64 },
    StoreCompleted { weight: u32, points: u32 },
    StoreEmpty,
    Stunned { duration_ms: u64 },
    StunEnded,
    TimeAdded { seconds: i64 },
    Paused,
    Resumed,
    GameOver { score: u32 },
}

/// Result of pressing deposit inside the grain bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositOutcome {
    /// Storing began
    Started,
    /// Nothing carried; the empty-storage dialog is shown instead
    Empty,
    /// Already storing or stunned; nothing changed
    Busy,
}

/// Complete game state for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    /// Match countdown, paused with the game
    pub match_timer: PausableTimer,
    pub current_weight: u32,
    pub max_weight: u32,
    /// The grain bin
    pub storage_zone: Rect,
    /// Running while a deposit is in progress
    pub storing: PausableTimer,
    /// Running while the player is stunned
    pub stunned: PausableTimer,
    pub dialog: Dialog,
    pub player: Player,
    /// Player overlaps the grain bin (shows the store prompt)
    pub in_storage_zone: bool,
    /// Events raised since the last drain. Grows until the host takes
    /// them; [`super::session::Session`] does so every frame.
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh match starting at `now`
    pub fn new(tuning: &Tuning, now: u64) -> Self {
        let player = Player::new(
            tuning.player_spawn(),
            Vec2::new(tuning.player_width, tuning.player_height),
            tuning.player_speed,
        );
        let in_storage_zone = player.hitbox().overlaps(&tuning.storage_zone);
        Self {
            paused: false,
            game_over: false,
            score: 0,
            match_timer: PausableTimer::started(now, tuning.match_duration_ms()),
            current_weight: 0,
            max_weight: tuning.max_weight,
            storage_zone: tuning.storage_zone,
            storing: PausableTimer::default(),
            stunned: PausableTimer::default(),
            dialog: Dialog::default(),
            player,
            in_storage_zone,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Flip pause; ignored once the match is over
    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            log::info!("Paused");
            self.push_event(GameEvent::Paused);
        } else {
            log::info!("Resumed");
            self.push_event(GameEvent::Resumed);
        }
    }

    pub fn remaining_ms(&self, now: u64) -> u64 {
        self.match_timer.remaining(now)
    }

    /// Whole seconds left, rounded up so the clock reads 0 only at the end
    pub fn remaining_secs(&self, now: u64) -> u64 {
        self.remaining_ms(now).div_ceil(1000)
    }

    pub fn is_storing(&self) -> bool {
        self.storing.is_active()
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned.is_active()
    }

    /// Storing and stunned both lock movement, as do pause and game over
    pub fn can_move(&self) -> bool {
        !self.paused && !self.game_over && !self.is_storing() && !self.is_stunned()
    }

    /// Handle the deposit input while inside the grain bin
    pub fn try_deposit(&mut self, tuning: &Tuning, now: u64) -> DepositOutcome {
        if self.is_storing() || self.is_stunned() {
            return DepositOutcome::Busy;
        }
        if self.current_weight == 0 {
            self.show_dialog(DialogId::EmptyStorage, tuning.dialog_duration_ms, now);
            self.push_event(GameEvent::StoreEmpty);
            return DepositOutcome::Empty;
        }
        let weight = self.current_weight;
        let duration_ms = tuning.store_duration_ms(weight);
        self.storing.start(now, duration_ms);
        log::debug!("Storing {} grain over {}ms", weight, duration_ms);
        self.push_event(GameEvent::StoreStarted { weight, duration_ms });
        DepositOutcome::Started
    }

    /// Per-frame timer bookkeeping and the transitions they drive
    pub fn update_timers(&mut self, tuning: &Tuning, now: u64) {
        let frozen = self.paused || self.game_over;
        self.match_timer.tick(now, self.paused);
        self.storing.tick(now, frozen);
        self.stunned.tick(now, frozen);

        if !frozen && self.storing.is_expired(now) {
            self.complete_storing(tuning, now);
        }

        if !frozen && self.stunned.is_expired(now) {
            self.stunned.cancel();
            self.player.recover();
            log::debug!("Stun over");
            self.push_event(GameEvent::StunEnded);
        }

        self.dialog.update(now);

        if !self.paused && !self.game_over && self.match_timer.is_expired(now) {
            self.game_over = true;
            log::info!("Game over, final score {}", self.score);
            self.push_event(GameEvent::GameOver { score: self.score });
        }
    }

    fn complete_storing(&mut self, tuning: &Tuning, now: u64) {
        let weight = self.current_weight;
        let points = tuning.store_score(weight);
        self.score += points;
        self.current_weight = 0;
        self.storing.cancel();
        log::debug!("Stored {} grain for {} points (score {})", weight, points, self.score);
        self.show_dialog(DialogId::StorageSuccess, tuning.dialog_duration_ms, now);
        self.push_event(GameEvent::StoreCompleted { weight, points });
    }
}

impl CollectTarget for GameState {
    fn add_weight(&mut self, amount: u32) {
        self.current_weight = (self.current_weight + amount).min(self.max_weight);
    }

    fn fill_weight(&mut self) {
        self.current_weight = self.max_weight;
    }

    fn stun_player(&mut self, duration_ms: u64, now: u64) -> bool {
        if !self.stunned.start(now, duration_ms) {
            return false;
        }
        self.player.stun();
        log::debug!("Player stunned for {}ms", duration_ms);
        self.push_event(GameEvent::Stunned { duration_ms });
        true
    }

    fn add_match_time(&mut self, seconds: i64, _now: u64) {
        self.match_timer.shift(seconds.saturating_mul(1000));
        self.push_event(GameEvent::TimeAdded { seconds });
    }

    fn show_dialog(&mut self, id: DialogId, duration_ms: u64, now: u64) {
        self.dialog.show(id, duration_ms, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> (Tuning, GameState) {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, 0);
        (tuning, state)
    }

    #[test]
    fn test_deposit_completes_after_duration() {
        let (tuning, mut state) = state();
        state.current_weight = 3;

        assert_eq!(state.try_deposit(&tuning, 1000), DepositOutcome::Started);
        assert_eq!(state.storing.duration(), tuning.store_durations_ms[3]);
        assert!(!state.can_move());

        let done_at = 1000 + tuning.store_durations_ms[3];
        state.update_timers(&tuning, done_at - 1);
        assert!(state.is_storing());
        assert_eq!(state.score, 0);

        state.update_timers(&tuning, done_at);
        assert!(!state.is_storing());
        assert_eq!(state.score, tuning.store_scores[3]);
        assert_eq!(state.current_weight, 0);
        assert_eq!(state.dialog.current_id(), Some(DialogId::StorageSuccess));
        assert!(state.events.contains(&GameEvent::StoreCompleted {
            weight: 3,
            points: tuning.store_scores[3],
        }));
    }

    #[test]
    fn test_empty_deposit_shows_dialog() {
        let (tuning, mut state) = state();
        assert_eq!(state.try_deposit(&tuning, 2000), DepositOutcome::Empty);
        assert!(!state.is_storing());
        assert_eq!(state.dialog.current_id(), Some(DialogId::EmptyStorage));

        state.update_timers(&tuning, 3000);
        assert!(state.dialog.is_visible());
        state.update_timers(&tuning, 3001);
        assert!(!state.dialog.is_visible());
    }

    #[test]
    fn test_deposit_is_idempotent_while_storing() {
        let (tuning, mut state) = state();
        state.current_weight = 2;
        state.try_deposit(&tuning, 0);
        let storing = state.storing.clone();
        let events = state.events.len();

        assert_eq!(state.try_deposit(&tuning, 500), DepositOutcome::Busy);
        assert_eq!(state.storing, storing);
        assert_eq!(state.events.len(), events);
    }

    #[test]
    fn test_storing_freezes_while_paused() {
        let (tuning, mut state) = state();
        state.current_weight = 1;
        state.try_deposit(&tuning, 0);

        state.update_timers(&tuning, 400);
        state.toggle_pause();
        state.update_timers(&tuning, 500);
        state.update_timers(&tuning, 10_000);
        assert!(state.is_storing());

        state.toggle_pause();
        state.update_timers(&tuning, 10_400);
        assert!(state.is_storing());
        // 500ms ran before the pause, 1000ms needed in total
        state.update_timers(&tuning, 10_899);
        assert!(state.is_storing());
        state.update_timers(&tuning, 10_900);
        assert!(!state.is_storing());
        assert_eq!(state.score, tuning.store_scores[1]);
    }

    #[test]
    fn test_pause_preserves_remaining_time() {
        let (tuning, mut state) = state();
        state.update_timers(&tuning, 50_000);
        assert_eq!(state.remaining_secs(50_000), 70);

        state.toggle_pause();
        state.update_timers(&tuning, 50_000);
        state.update_timers(&tuning, 55_000);
        assert_eq!(state.remaining_secs(55_000), 70);

        state.toggle_pause();
        state.update_timers(&tuning, 60_000);
        assert_eq!(state.remaining_secs(60_000), 70);
        assert_eq!(state.remaining_secs(61_000), 69);
    }

    #[test]
    fn test_clock_bonus_is_immediate() {
        let (tuning, mut state) = state();
        let now = 90_000;
        state.update_timers(&tuning, now);
        assert_eq!(state.remaining_secs(now), 30);

        state.add_match_time(10, now);
        assert_eq!(state.remaining_secs(now), 40);
    }

    #[test]
    fn test_dialog_runs_while_paused() {
        let (tuning, mut state) = state();
        assert_eq!(state.try_deposit(&tuning, 100), DepositOutcome::Empty);
        state.toggle_pause();
        state.update_timers(&tuning, 100);

        state.update_timers(&tuning, 100 + tuning.dialog_duration_ms);
        assert!(state.dialog.is_visible());
        state.update_timers(&tuning, 100 + tuning.dialog_duration_ms + 1);
        assert!(state.paused);
        assert!(!state.dialog.is_visible());
        // The match clock stayed frozen meanwhile
        assert_eq!(state.remaining_ms(100 + tuning.dialog_duration_ms + 1), 119_900);
    }

    #[test]
    fn test_huge_time_bonus_saturates() {
        let (tuning, mut state) = state();
        state.add_match_time(i64::MAX, 1000);
        assert!(state.remaining_secs(1000) > tuning.match_duration_secs);
        state.update_timers(&tuning, 1000);
        assert!(!state.game_over);

        let (_, mut state) = self::state();
        state.add_match_time(i64::MIN, 1000);
        state.update_timers(&tuning, 1000);
        assert!(state.game_over);
    }

    #[test]
    fn test_game_over_not_while_paused() {
        let (tuning, mut state) = state();
        state.update_timers(&tuning, 119_000);
        state.toggle_pause();
        state.update_timers(&tuning, 119_000);
        state.update_timers(&tuning, 200_000);
        assert!(!state.game_over);

        state.toggle_pause();
        state.update_timers(&tuning, 200_000);
        assert_eq!(state.remaining_ms(200_000), 1000);
        state.update_timers(&tuning, 200_999);
        assert!(!state.game_over);
        state.update_timers(&tuning, 201_000);
        assert!(state.game_over);
        assert_eq!(state.remaining_secs(201_000), 0);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        // Pause is locked out once the match has ended
        state.toggle_pause();
        assert!(!state.paused);
    }

    #[test]
    fn test_stun_cycle() {
        let (tuning, mut state) = state();
        assert!(state.stun_player(2000, 100));
        assert!(state.player.is_stunned());
        assert!(!state.can_move());
        assert_eq!(state.try_deposit(&tuning, 200), DepositOutcome::Busy);

        // No refresh while already stunned
        assert!(!state.stun_player(5000, 1000));
        assert_eq!(state.stunned.duration(), 2000);

        state.update_timers(&tuning, 2099);
        assert!(state.is_stunned());
        state.update_timers(&tuning, 2100);
        assert!(!state.is_stunned());
        assert_eq!(state.player.state, PlayerState::Idle);
        assert!(state.can_move());
    }

    #[test]
    fn test_super_food_fills_load() {
        let (_, mut state) = state();
        state.current_weight = 1;
        state.fill_weight();
        assert_eq!(state.current_weight, state.max_weight);
    }

    #[test]
    fn test_steer_clamps_to_screen() {
        let mut player = Player::new(Vec2::new(2.0, 0.0), Vec2::new(60.0, 60.0), 5.0);
        player.steer(true, false, 800.0);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.state, PlayerState::MovingLeft);

        player.pos.x = 738.0;
        player.steer(false, true, 800.0);
        assert_eq!(player.pos.x, 740.0);

        player.steer(true, true, 800.0);
        assert_eq!(player.state, PlayerState::Idle);

        player.stun();
        player.steer(true, false, 800.0);
        assert_eq!(player.pos.x, 740.0);
    }

    proptest! {
        /// No sequence of food pickups carries more than capacity
        #[test]
        fn prop_weight_never_exceeds_capacity(pickups in prop::collection::vec(1u32..3, 0..40)) {
            let (_, mut state) = state();
            for amount in pickups {
                state.add_weight(amount);
                prop_assert!(state.current_weight <= state.max_weight);
            }
        }

        /// Repeated stun triggers leave the first stun untouched
        #[test]
        fn prop_stun_trigger_idempotent(retries in prop::collection::vec((1u64..1000, 1u64..10_000), 1..10)) {
            let (_, mut state) = state();
            state.stun_player(1500, 0);
            let first = state.stunned.clone();
            for (at, duration) in retries {
                prop_assert!(!state.stun_player(duration, at));
                prop_assert_eq!(&state.stunned, &first);
            }
        }
    }
}
