//! Rendering
//!
//! Each frame is first flattened into a list of [`DrawCommand`]s, which the
//! canvas backend then executes. The list is plain data so it can be
//! checked without a browser.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::sim::{GameState, Region, SpriteKind, restart_button};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One drawing operation, in CSS pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Scrolling starfield, drawn twice to cover the wrap
    Background { top: f32 },
    Sprite {
        kind: SpriteKind,
        pos: Vec2,
        size: Vec2,
    },
    Text {
        text: String,
        pos: Vec2,
        /// Font size in pixels
        size: f32,
        align: TextAlign,
        color: &'static str,
    },
    /// Darken the whole surface
    Dim { alpha: f32 },
    Button { region: Region, label: String },
}

/// Values shown on screen that live outside the game state
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud {
    pub best_score: u64,
    /// `None` hides the counter
    pub fps: Option<u32>,
}

const HUD_MARGIN: f32 = 12.0;
const HUD_FONT: f32 = 20.0;
const TEXT_COLOR: &str = "#ffffff";
const ACCENT_COLOR: &str = "#ffcc33";

/// Build the draw list for one frame, back to front
pub fn build_frame(state: &GameState, hud: &Hud) -> Vec<DrawCommand> {
    let vp = state.viewport;
    let mut commands = Vec::with_capacity(state.enemies.len() + state.bullets.len() + 10);

    commands.push(DrawCommand::Background {
        top: state.background.top,
    });

    commands.extend(state.enemies.iter().map(|e| sprite(&e.sprite)));
    commands.push(sprite(&state.player));
    commands.extend(state.bullets.iter().map(sprite));

    commands.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(HUD_MARGIN, HUD_MARGIN),
        size: HUD_FONT,
        align: TextAlign::Left,
        color: TEXT_COLOR,
    });

    if let Some(fps) = hud.fps {
        commands.push(DrawCommand::Text {
            text: format!("{fps} FPS"),
            pos: Vec2::new(vp.width - HUD_MARGIN, HUD_MARGIN),
            size: HUD_FONT * 0.7,
            align: TextAlign::Right,
            color: TEXT_COLOR,
        });
    }

    if state.is_game_over() {
        let cx = vp.width / 2.0;
        let cy = vp.height / 2.0;
        commands.push(DrawCommand::Dim { alpha: 0.55 });
        commands.push(DrawCommand::Text {
            text: "GAME OVER".to_string(),
            pos: Vec2::new(cx, cy - 90.0),
            size: 44.0,
            align: TextAlign::Center,
            color: ACCENT_COLOR,
        });
        commands.push(DrawCommand::Text {
            text: format!("Score {}", state.score),
            pos: Vec2::new(cx, cy - 30.0),
            size: 26.0,
            align: TextAlign::Center,
            color: TEXT_COLOR,
        });
        commands.push(DrawCommand::Text {
            text: format!("Best {}", hud.best_score.max(state.score)),
            pos: Vec2::new(cx, cy + 4.0),
            size: 18.0,
            align: TextAlign::Center,
            color: TEXT_COLOR,
        });
        commands.push(DrawCommand::Button {
            region: restart_button(&vp),
            label: "Restart".to_string(),
        });
    }

    commands
}

fn sprite(s: &crate::sim::Sprite) -> DrawCommand {
    DrawCommand::Sprite {
        kind: s.kind,
        pos: s.pos,
        size: s.size,
    }
}
