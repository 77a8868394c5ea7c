//! Idle-break timer.

use tracing::debug;

use crate::core::rng::UniformSource;
use crate::reindeer::config::ReindeerConfig;
use crate::reindeer::state::LocomotionState;

/// Draw a fresh idle threshold from the configured range.
#[inline]
pub fn draw_threshold<R: UniformSource + ?Sized>(rng: &mut R, config: &ReindeerConfig) -> f32 {
    rng.uniform(config.min_idle_wait, config.max_idle_wait)
}

/// Accumulate idle time. Returns the newly drawn threshold when a break fires.
///
/// Counting only happens while grounded, still and not eating. Anything
/// else zeroes the accumulator and keeps the current threshold.
pub fn update_idle<R: UniformSource + ?Sized>(
    state: &mut LocomotionState,
    dt: f32,
    config: &ReindeerConfig,
    rng: &mut R,
) -> Option<f32> {
    let qualifies = state.grounded && !state.eating && state.is_idle_input(config.input_threshold);
    if !qualifies {
        state.idle_timer = 0.0;
        return None;
    }

    state.idle_timer += dt;
    if state.idle_timer < state.next_idle_time {
        return None;
    }

    state.idle_timer = 0.0;
    state.next_idle_time = draw_threshold(rng, config);
    debug!(next = state.next_idle_time, "idle break");
    Some(state.next_idle_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{DeterministicRng, FixedUniform};
    use glam::Vec2;

    fn idle_state(threshold: f32) -> LocomotionState {
        let mut state = LocomotionState::new(0.0, threshold);
        state.grounded = true;
        state
    }

    #[test]
    fn test_fires_once_after_threshold() {
        let config = ReindeerConfig::default();
        let mut rng = FixedUniform(7.0);
        let mut state = idle_state(6.0);

        // 0.25 s steps are exact in binary, 24 of them reach 6.0 exactly
        let mut fired = 0;
        for step in 1..=24 {
            if let Some(next) = update_idle(&mut state, 0.25, &config, &mut rng) {
                fired += 1;
                assert_eq!(step, 24);
                assert_eq!(next, 7.0);
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(state.idle_timer, 0.0);
        assert_eq!(state.next_idle_time, 7.0);
    }

    #[test]
    fn test_movement_resets_without_redraw() {
        let config = ReindeerConfig::default();
        let mut rng = FixedUniform(9.0);
        let mut state = idle_state(6.0);

        update_idle(&mut state, 3.0, &config, &mut rng);
        assert_eq!(state.idle_timer, 3.0);

        state.move_input = Vec2::Y;
        assert_eq!(update_idle(&mut state, 0.1, &config, &mut rng), None);
        assert_eq!(state.idle_timer, 0.0);
        assert_eq!(state.next_idle_time, 6.0);
    }

    #[test]
    fn test_ground_loss_and_eating_reset() {
        let config = ReindeerConfig::default();
        let mut rng = FixedUniform(9.0);

        let mut state = idle_state(6.0);
        update_idle(&mut state, 3.0, &config, &mut rng);
        state.grounded = false;
        update_idle(&mut state, 0.1, &config, &mut rng);
        assert_eq!(state.idle_timer, 0.0);

        let mut state = idle_state(6.0);
        update_idle(&mut state, 3.0, &config, &mut rng);
        state.eating = true;
        update_idle(&mut state, 0.1, &config, &mut rng);
        assert_eq!(state.idle_timer, 0.0);
        assert_eq!(state.next_idle_time, 6.0);
    }

    #[test]
    fn test_redraw_stays_in_range() {
        let config = ReindeerConfig::default();
        let mut rng = DeterministicRng::new(31337);
        let mut state = idle_state(0.0);

        for _ in 0..500 {
            state.idle_timer = state.next_idle_time;
            let next = update_idle(&mut state, 0.0, &config, &mut rng).expect("should fire");
            assert!(next >= config.min_idle_wait && next < config.max_idle_wait);
        }
    }
}
