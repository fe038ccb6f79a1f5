//! Player input
//!
//! Browser callbacks push [`InputEvent`]s into a queue; the queue is drained
//! once per tick so every state change happens inside the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::consts::{RESTART_BUTTON_HEIGHT, RESTART_BUTTON_OFFSET_Y, RESTART_BUTTON_WIDTH};

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Finger down (or mouse button down)
    TouchStart { pos: Vec2 },
    /// Finger moved while down
    TouchMove { pos: Vec2 },
    /// Finger lifted
    TouchEnd,
}

/// Tracks whether the finger currently holds the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchTracker {
    dragging: bool,
}

impl TouchTracker {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin(&mut self) {
        self.dragging = true;
    }

    pub fn end(&mut self) {
        self.dragging = false;
    }
}

/// An axis-aligned screen region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// The restart button on the game-over overlay
pub fn restart_button(viewport: &Viewport) -> Region {
    let size = Vec2::new(RESTART_BUTTON_WIDTH, RESTART_BUTTON_HEIGHT);
    let pos = Vec2::new(
        viewport.width / 2.0 - size.x / 2.0,
        viewport.height / 2.0 + RESTART_BUTTON_OFFSET_Y,
    );
    Region::from_pos_size(pos, size)
}
