//! Jump gate.
//!
//! A jump is accepted only while grounded and once the cooldown has
//! elapsed. Acceptance re-arms the cooldown; rejection changes nothing.

use crate::reindeer::state::LocomotionState;

/// Whether a jump would be accepted at `now`.
#[inline]
pub fn can_jump(state: &LocomotionState, now: f32) -> bool {
    state.grounded && now >= state.next_jump_time
}

/// Try to consume a jump request. Returns `true` when accepted.
pub fn try_jump(state: &mut LocomotionState, now: f32, cooldown: f32) -> bool {
    if !can_jump(state, now) {
        return false;
    }
    state.next_jump_time = now + cooldown;
    true
}
