//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! tuning block only needs to name the values it changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Tuning is not valid JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("Tuning field `{field}` must be greater than zero")]
    NotPositive { field: &'static str },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation ticks per second
    pub fps: u32,
    /// Player sprite size (width, height)
    pub player_size: Vec2,
    pub player_bottom_margin: f32,
    pub grab_deviation: f32,
    pub bullet_size: Vec2,
    /// Pixels per tick, upward
    pub bullet_speed: f32,
    pub bullet_interval: u64,
    pub enemy_size: Vec2,
    /// Pixels per tick, downward
    pub enemy_speed: f32,
    pub enemy_interval: u64,
    pub bg_scroll_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            grab_deviation: GRAB_DEVIATION,
            bullet_size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            bullet_speed: BULLET_SPEED,
            bullet_interval: BULLET_INTERVAL,
            enemy_size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            enemy_speed: ENEMY_SPEED,
            enemy_interval: ENEMY_INTERVAL,
            bg_scroll_speed: BG_SCROLL_SPEED,
        }
    }
}

impl Tuning {
    /// Parse a tuning block and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a tuning block, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let checks: [(&'static str, bool); 9] = [
            ("fps", self.fps > 0),
            ("player_size", self.player_size.min_element() > 0.0),
            ("bullet_size", self.bullet_size.min_element() > 0.0),
            ("bullet_speed", self.bullet_speed > 0.0),
            ("bullet_interval", self.bullet_interval > 0),
            ("enemy_size", self.enemy_size.min_element() > 0.0),
            ("enemy_speed", self.enemy_speed > 0.0),
            ("enemy_interval", self.enemy_interval > 0),
            ("bg_scroll_speed", self.bg_scroll_speed >= 0.0),
        ];
        match checks.into_iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(TuningError::NotPositive { field }),
            None => Ok(()),
        }
    }

    /// Fixed tick length in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.fps, 60);
        assert_eq!(t.bullet_interval, 20);
        assert_eq!(t.enemy_interval, 30);
        assert_eq!(t.player_size, Vec2::new(80.0, 80.0));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t = Tuning::from_json(r#"{ "enemy_speed": 9.0, "bullet_size": [10, 20] }"#)
            .expect("valid tuning");
        assert_eq!(t.enemy_speed, 9.0);
        assert_eq!(t.bullet_size, Vec2::new(10.0, 20.0));
        assert_eq!(t.bullet_speed, BULLET_SPEED);
        assert_eq!(t.enemy_interval, ENEMY_INTERVAL);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "bullet_interval": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "bullet_interval"
            }
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse { .. }));
        assert_eq!(Tuning::from_json_or_default("not json"), Tuning::default());
    }

    #[test]
    fn test_tick_dt() {
        let t = Tuning {
            fps: 50,
            ..Default::default()
        };
        assert!((t.tick_dt() - 0.02).abs() < 1e-6);
    }
}
