//! Sky Strike - a vertical touch shoot-'em-up
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, spawning, collisions, game over)
//! - `clock`: Fixed-cadence frame clock
//! - `game`: Session driver that queues input and runs ticks
//! - `renderer`: Draw command list and the 2D canvas backend
//! - `audio`: Sound effects for game events
//! - `platform`: Browser glue
//! - `tuning` / `settings`: Data-driven balance and player preferences

pub mod audio;
pub mod clock;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Display refresh cadence the simulation ticks at
    pub const FPS: u32 = 60;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Player sprite
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Gap between the player's initial position and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 30.0;
    /// Extra slack around the player when grabbing it with a finger
    pub const GRAB_DEVIATION: f32 = 30.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 16.0;
    pub const BULLET_HEIGHT: f32 = 30.0;
    pub const BULLET_SPEED: f32 = 6.0;
    /// A bullet spawns on every Nth frame
    pub const BULLET_INTERVAL: u64 = 20;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 60.0;
    pub const ENEMY_HEIGHT: f32 = 60.0;
    pub const ENEMY_SPEED: f32 = 6.0;
    /// An enemy spawns on every Nth frame
    pub const ENEMY_INTERVAL: u64 = 30;

    /// Background tile and scroll
    pub const BG_WIDTH: f32 = 512.0;
    pub const BG_HEIGHT: f32 = 512.0;
    pub const BG_SCROLL_SPEED: f32 = 2.0;

    /// Restart button on the game-over overlay (centered horizontally)
    pub const RESTART_BUTTON_WIDTH: f32 = 200.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 60.0;
    /// Offset of the button's top edge below the vertical center
    pub const RESTART_BUTTON_OFFSET_Y: f32 = 40.0;
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when the range is inverted
/// (a viewport smaller than the sprite) the result pins to `min`.
#[inline]
pub fn clamp_range(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
