//! Player preferences
//!
//! Read from the page URL (`?volume=0.5&mute=1&fps=1`) at startup.
//! Nothing is written back.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// All audio off
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Start with the autopilot flying
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            show_fps: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Apply `key=value` pairs from a URL query string on top of the defaults.
    ///
    /// Unknown keys and unparsable values are skipped.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            match key {
                "volume" => {
                    if let Some(v) = parse_volume(value) {
                        settings.master_volume = v;
                    }
                }
                "sfx" => {
                    if let Some(v) = parse_volume(value) {
                        settings.sfx_volume = v;
                    }
                }
                "mute" => settings.muted = parse_flag(value),
                "blurmute" => settings.mute_on_blur = parse_flag(value),
                "fps" => settings.show_fps = parse_flag(value),
                "demo" => settings.autopilot = parse_flag(value),
                _ => log::debug!("Ignoring unknown setting `{key}`"),
            }
        }

        settings
    }

    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

fn parse_volume(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_flag(value: &str) -> bool {
    matches!(value, "1" | "true" | "on" | "yes")
}
