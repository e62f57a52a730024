pub mod game_trait;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashMap;

    use crate::game_trait::{BaizeGame, GameConfig, GameEvent};

    /// Create an empty `GameConfig`.
    pub fn default_config() -> GameConfig {
        GameConfig {
            custom: HashMap::new(),
        }
    }

    /// Run N game updates of `dt` seconds each, returning all accumulated events.
    pub fn run_game_ticks(game: &mut dyn BaizeGame, n: usize, dt: f32) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed(game: &dyn BaizeGame, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // These functions form a generic test suite that every BaizeGame
    // implementation must pass. Game crates call them from their own
    // #[cfg(test)] modules with a concrete game instance and valid input.

    /// After init(), serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_state(game: &mut dyn BaizeGame) {
        game.init(&default_config());
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// update() with dt>0 on a freshly initialized game must change state.
    pub fn contract_update_advances_state(game: &mut dyn BaizeGame) {
        let before = game.serialize_state();
        game.update(1.0);
        let after = game.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance game state");
    }

    /// apply_input() with valid data followed by update() must change state.
    pub fn contract_apply_input_changes_state(game: &mut dyn BaizeGame, valid_input: &[u8]) {
        let before = game.serialize_state();
        game.apply_input(valid_input);
        game.update(0.1);
        let after = game.serialize_state();
        assert_ne!(before, after, "State must change after apply_input + update");
    }

    /// serialize_state → apply_state roundtrip: the game must produce
    /// identical bytes after applying its own serialized output. We do
    /// serialize→apply→serialize→apply→serialize and check the last two
    /// serializations match (stable after one roundtrip).
    pub fn contract_state_roundtrip_stable(game: &mut dyn BaizeGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        game.apply_state(&state_b);
        let state_c = game.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze the simulation, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn BaizeGame) {
        game.pause();
        let before = game.serialize_state();
        game.update(1.0);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(1.0);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }
}
