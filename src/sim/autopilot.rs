//! Idle/demo mode - the computer flies the plane
//!
//! The autopilot only speaks the same touch events a player would, so the
//! simulation cannot tell it apart from a finger.

use glam::Vec2;

use super::input::{InputEvent, restart_button};
use super::state::{Enemy, GameState};
use crate::clamp_range;

/// Horizontal pixels the autopilot drags per tick
const MAX_STEP: f32 = 8.0;
/// How far above the player an enemy counts as incoming
const DANGER_ZONE: f32 = 150.0;
/// Extra clearance kept when sidestepping
const DODGE_MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Touch events to queue for the next tick
    pub fn plan(&self, state: &GameState) -> Vec<InputEvent> {
        if state.is_game_over() {
            return vec![InputEvent::TouchStart {
                pos: restart_button(&state.viewport).center(),
            }];
        }

        let mut events = Vec::with_capacity(2);
        let center = state.player.center();
        if !state.touch.is_dragging() {
            events.push(InputEvent::TouchStart { pos: center });
        }

        let target_x = self.target_x(state);
        let step = clamp_range(target_x - center.x, -MAX_STEP, MAX_STEP);
        events.push(InputEvent::TouchMove {
            pos: Vec2::new(center.x + step, center.y),
        });
        events
    }

    /// Column the player's center should head for
    fn target_x(&self, state: &GameState) -> f32 {
        let player = &state.player;
        let center = player.center();

        // Sidestep the closest incoming enemy first
        let threat = state
            .enemies
            .iter()
            .filter(|e| is_threat(state, e))
            .max_by(|a, b| a.sprite.pos.y.total_cmp(&b.sprite.pos.y));

        if let Some(enemy) = threat {
            let clearance = (player.size.x + enemy.sprite.size.x) / 2.0 + DODGE_MARGIN;
            let enemy_x = enemy.sprite.center().x;
            let half = player.size.x / 2.0;
            let left = enemy_x - clearance;
            let right = enemy_x + clearance;
            let left_fits = left - half >= 0.0;
            let right_fits = right + half <= state.viewport.width;

            return match (left_fits, right_fits) {
                (true, true) if center.x <= enemy_x => left,
                (true, true) => right,
                (true, false) => left,
                (false, true) => right,
                (false, false) => center.x,
            };
        }

        // Otherwise line up under the lowest enemy still above us
        state
            .enemies
            .iter()
            .filter(|e| e.sprite.center().y < player.pos.y)
            .max_by(|a, b| a.sprite.pos.y.total_cmp(&b.sprite.pos.y))
            .map(|e| e.sprite.center().x)
            .unwrap_or(center.x)
    }
}

fn is_threat(state: &GameState, enemy: &Enemy) -> bool {
    let player = &state.player;
    let sprite = &enemy.sprite;
    let overlaps_x = sprite.pos.x <= player.max().x + DODGE_MARGIN
        && sprite.max().x >= player.pos.x - DODGE_MARGIN;
    let incoming = sprite.max().y >= player.pos.y - DANGER_ZONE && sprite.pos.y <= player.max().y;
    overlaps_x && incoming
}
