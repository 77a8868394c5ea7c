//! Reindeer Input Snapshot
//!
//! One frame of raw input: movement axes plus packed action flags. Edge
//! flags (`JUMP`, `EAT`, `ATTACK`, `DIE`) mean "pressed this frame"; `RUN`
//! is a held state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::math::normalize_axes;

/// Raw input state for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReindeerInput {
    /// Horizontal axis: -1 (left) to +1 (right).
    pub move_x: f32,
    /// Vertical axis: -1 (back) to +1 (forward).
    pub move_y: f32,
    /// Action flags (packed bits):
    /// - Bit 0: Jump pressed this frame
    /// - Bit 1: Eat pressed this frame
    /// - Bit 2: Attack pressed this frame
    /// - Bit 3: Die pressed this frame
    /// - Bit 4: Run held
    pub flags: u8,
}

impl ReindeerInput {
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x01;
    /// Eat flag bit
    pub const FLAG_EAT: u8 = 0x02;
    /// Attack flag bit
    pub const FLAG_ATTACK: u8 = 0x04;
    /// Die flag bit
    pub const FLAG_DIE: u8 = 0x08;
    /// Run flag bit
    pub const FLAG_RUN: u8 = 0x10;

    /// Create an empty input frame.
    pub const fn new() -> Self {
        Self { move_x: 0.0, move_y: 0.0, flags: 0 }
    }

    /// Create input with movement axes.
    pub const fn with_movement(move_x: f32, move_y: f32) -> Self {
        Self { move_x, move_y, flags: 0 }
    }

    /// Builder: add flags.
    pub const fn with_flags(mut self, flags: u8) -> Self {
        self.flags |= flags;
        self
    }

    /// Movement axes normalized to unit length (or zero).
    #[inline]
    pub fn move_direction(&self) -> Vec2 {
        normalize_axes(self.move_x, self.move_y)
    }

    /// Whether any axis is non-zero.
    #[inline]
    pub fn has_movement(&self) -> bool {
        self.move_x != 0.0 || self.move_y != 0.0
    }

    /// Jump pressed this frame.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Eat pressed this frame.
    #[inline]
    pub fn eat_pressed(&self) -> bool {
        self.flags & Self::FLAG_EAT != 0
    }

    /// Attack pressed this frame.
    #[inline]
    pub fn attack_pressed(&self) -> bool {
        self.flags & Self::FLAG_ATTACK != 0
    }

    /// Die pressed this frame.
    #[inline]
    pub fn die_pressed(&self) -> bool {
        self.flags & Self::FLAG_DIE != 0
    }

    /// Run held.
    #[inline]
    pub fn run_held(&self) -> bool {
        self.flags & Self::FLAG_RUN != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}
