use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{FlyError, FlyResult};

/// ESPN MLB scoreboard endpoint (no API key required).
pub const DEFAULT_SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb/scoreboard";

/// Typed plugin configuration.
///
/// Keys match the plugin host's JSON config. Every field is optional on the
/// wire; missing keys take the defaults below. A config is only ever applied
/// after [`CelebrationConfig::validate`] accepts it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Host-level enable switch.
    pub enabled: bool,
    /// Seconds the host shows this plugin per rotation slot.
    pub display_duration: f64,
    /// Minimum seconds between scoreboard fetches.
    pub update_interval: u64,
    /// Length of the celebration window after a win is detected.
    pub celebration_hours: f64,
    /// Frame rate of the synthesized flag animation.
    pub animation_fps: f64,
    pub show_score: bool,
    pub show_text: bool,
    pub font_name: String,
    pub font_size: u32,
    /// Skip fetching and force a canned win.
    pub simulate_win: bool,
    /// Scoreboard abbreviation of the monitored team.
    pub team_abbr: String,
    /// Celebratory label drawn over the animation.
    pub banner_text: String,
    pub scoreboard_url: String,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_duration: 30.0,
            update_interval: 300,
            celebration_hours: 1.0,
            animation_fps: 12.0,
            show_score: true,
            show_text: true,
            font_name: "4x6-font.ttf".to_owned(),
            font_size: 6,
            simulate_win: false,
            team_abbr: "CHC".to_owned(),
            banner_text: "CUBS WIN!".to_owned(),
            scoreboard_url: DEFAULT_SCOREBOARD_URL.to_owned(),
        }
    }
}

impl CelebrationConfig {
    pub fn from_json_str(s: &str) -> FlyResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .context("parse celebration config JSON")
            .map_err(|e| FlyError::config(format!("{e:#}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> FlyResult<Self> {
        let cfg: Self = serde_json::from_value(v)
            .context("decode celebration config")
            .map_err(|e| FlyError::config(format!("{e:#}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FlyResult<()> {
        let hours = self.celebration_hours;
        if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
            return Err(FlyError::config(format!(
                "celebration_hours must be in (0, 24], got {hours}"
            )));
        }

        let fps = self.animation_fps;
        if !fps.is_finite() || fps <= 0.0 || fps > 60.0 {
            return Err(FlyError::config(format!(
                "animation_fps must be in (0, 60], got {fps}"
            )));
        }

        if !self.display_duration.is_finite() || self.display_duration <= 0.0 {
            return Err(FlyError::config("display_duration must be > 0"));
        }
        if self.font_size == 0 {
            return Err(FlyError::config("font_size must be >= 1"));
        }
        if self.team_abbr.trim().is_empty() {
            return Err(FlyError::config("team_abbr must not be empty"));
        }
        Ok(())
    }

    /// Celebration window as a signed wall-clock span.
    pub fn celebration_window(&self) -> chrono::Duration {
        let millis = (self.celebration_hours * 3_600_000.0).round() as i64;
        chrono::Duration::milliseconds(millis)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval)
    }

    /// Uniform frame duration of the synthesized animation, in seconds.
    ///
    /// fps is floored at 1.0.
    pub fn synth_frame_secs(&self) -> f64 {
        1.0 / self.animation_fps.max(1.0)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
