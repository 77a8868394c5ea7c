//! Eating Interaction
//!
//! `NotEating -> Eating -> EatingExit -> NotEating`.
//!
//! The controller owns the `eating` flag. The animator never clears it on
//! its own: eating ends either through an explicit cancel (jump, movement,
//! death) or when the completion detector sees the reported state move
//! from the exit state to idle between two consecutive frames. The
//! detector is one-shot per episode via `completion_handled`.
//!
//! If the animator never reaches the exit state the creature simply stays
//! eating until something cancels it.

use tracing::debug;

use crate::host::{Animator, StateId};
use crate::reindeer::animator::{PARAM_EAT_TRIGGER, PARAM_IS_EATING};
use crate::reindeer::events::{CancelReason, ReindeerEvent};
use crate::reindeer::state::LocomotionState;

/// The pair of animator states whose transition ends an eating episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionEdge {
    /// State the animator leaves.
    pub exit: StateId,
    /// State the animator enters.
    pub idle: StateId,
}

/// Start eating if allowed. Returns the event on success.
///
/// Requires ground contact, input below `threshold` and not already eating.
pub fn start_eating<A: Animator + ?Sized>(
    state: &mut LocomotionState,
    animator: &mut A,
    threshold: f32,
) -> Option<ReindeerEvent> {
    if state.eating || !state.grounded || !state.is_idle_input(threshold) {
        return None;
    }
    animator.set_trigger(PARAM_EAT_TRIGGER);
    animator.set_bool(PARAM_IS_EATING, true);
    state.eating = true;
    state.completion_handled = false;
    debug!("eating started");
    Some(ReindeerEvent::EatingStarted)
}

/// Clear the eating flag and the completion latch.
fn clear_eating<A: Animator + ?Sized>(state: &mut LocomotionState, animator: &mut A) {
    animator.set_bool(PARAM_IS_EATING, false);
    state.eating = false;
    state.completion_handled = false;
}

/// Cancel an active eating interaction. No-op when not eating.
pub fn cancel_eating<A: Animator + ?Sized>(
    state: &mut LocomotionState,
    animator: &mut A,
    reason: CancelReason,
) -> Option<ReindeerEvent> {
    if !state.eating {
        return None;
    }
    clear_eating(state, animator);
    debug!(?reason, "eating cancelled");
    Some(ReindeerEvent::EatingCancelled { reason })
}

/// Record the animator's reported state for this frame.
pub fn observe_state(state: &mut LocomotionState, reported: StateId) {
    state.previous_state = state.current_state;
    state.current_state = reported;
}

/// Run the completion detector on the last two observed states.
pub fn check_completion<A: Animator + ?Sized>(
    state: &mut LocomotionState,
    animator: &mut A,
    edge: CompletionEdge,
) -> Option<ReindeerEvent> {
    if state.completion_handled || !state.eating {
        return None;
    }
    if state.previous_state == edge.exit && state.current_state == edge.idle {
        clear_eating(state, animator);
        state.completion_handled = true;
        debug!("eating finished: exit -> idle observed");
        return Some(ReindeerEvent::EatingCompleted);
    }
    None
}
