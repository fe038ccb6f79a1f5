//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One call to `tick` per frame, fixed step sizes in pixels per frame
//! - Seeded RNG only
//! - Input arrives as queued events, applied at the start of a tick

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{collides_with, contains_point, first_hit, grabs};
pub use input::{InputEvent, Region, TouchTracker, restart_button};
pub use state::{
    Background, Enemy, GameEvent, GamePhase, GameState, Sprite, SpriteKind, Viewport,
};
pub use tick::{TickInput, tick};
