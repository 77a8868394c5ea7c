//! Reindeer Events
//!
//! Notifications produced while ticking. They carry no feedback into the
//! controller; hosts use them for logging, audio and UI hooks.

use serde::{Deserialize, Serialize};

/// Why an eating interaction ended early.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancelReason {
    /// A jump was accepted.
    Jump,
    /// Movement input exceeded the threshold.
    Movement,
    /// The creature died.
    Death,
}

/// Something observable happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReindeerEvent {
    /// Ground probe went from clear to touching.
    Landed,
    /// Ground probe went from touching to clear.
    LeftGround,
    /// A jump request passed the gate.
    Jumped {
        /// Earliest time of the next accepted jump.
        next_jump_time: f32,
    },
    /// Eating started.
    EatingStarted,
    /// Eating ended early.
    EatingCancelled {
        /// What cancelled it.
        reason: CancelReason,
    },
    /// The animator finished the eating exit and returned to idle.
    EatingCompleted,
    /// An idle-break animation was triggered.
    IdleBreak {
        /// Freshly drawn threshold for the next break.
        next_threshold: f32,
    },
    /// Attack triggered.
    Attacked,
    /// The creature died; the controller is now inert.
    Died,
}
