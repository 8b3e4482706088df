use std::sync::Arc;
use std::time::Duration;

use chrono::SecondsFormat;
use image::RgbImage;

use crate::celebration::machine::{CelebrationMachine, PollReport, Transition};
use crate::celebration::state::{CelebrationState, WinRecord};
use crate::config::CelebrationConfig;
use crate::feed::source::ScoreboardFeed;
use crate::foundation::clock::Clock;
use crate::foundation::core::Canvas;
use crate::foundation::error::FlyResult;
use crate::frames::sequence::{AnimationAsset, FrameSet, FrameSource};
use crate::frames::synth::SynthParams;
use crate::render::glyphs::MonoGlyphs;
use crate::render::overlay::{self, OverlayOpts};
use crate::render::scheduler::AnimationCursor;
use crate::render::sink::DisplaySink;

/// Live mode names this plugin can take over the display with.
pub const LIVE_MODES: &[&str] = &["fly_the_w"];

/// How a compact scrolling display should embed this plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VegasDisplayMode {
    Static,
    FixedSegment,
}

/// Diagnostics snapshot, serialized for the host's status endpoint.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CelebrationStatus {
    pub active: bool,
    /// ISO-8601, `null` before the first win.
    pub expires_at: Option<String>,
    pub score_label: String,
    /// ISO-8601, `null` before the first fetch.
    pub last_poll_time: Option<String>,
    pub frames_decoded: bool,
    pub frame_count: usize,
}

/// The celebration module as seen by a plugin host.
///
/// The host drives two independent ticks, [`update`](Self::update) and
/// [`display`](Self::display), and must serialize them; the plugin holds no
/// locks.
pub struct CelebrationPlugin {
    config: CelebrationConfig,
    machine: CelebrationMachine,
    source: FrameSource,
    frames: Option<FrameSet>,
    frame_generation: u64,
    cursor: AnimationCursor,
    glyphs: MonoGlyphs,
    feed: Box<dyn ScoreboardFeed>,
    clock: Arc<dyn Clock>,
}

impl CelebrationPlugin {
    pub fn new(
        config: CelebrationConfig,
        canvas: Canvas,
        asset: AnimationAsset,
        feed: Box<dyn ScoreboardFeed>,
        clock: Arc<dyn Clock>,
    ) -> FlyResult<Self> {
        config.validate()?;
        let glyphs = MonoGlyphs::resolve(&config.font_name, config.font_size);
        let mut plugin = Self {
            config,
            machine: CelebrationMachine::new(),
            source: FrameSource::new(asset, canvas),
            frames: None,
            frame_generation: 0,
            cursor: AnimationCursor::default(),
            glyphs,
            feed,
            clock,
        };
        plugin.rebuild_frames();
        tracing::info!(
            width = canvas.width,
            height = canvas.height,
            team = %plugin.config.team_abbr,
            "celebration plugin initialized"
        );
        Ok(plugin)
    }

    pub fn config(&self) -> &CelebrationConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.source.canvas()
    }

    pub fn state(&self) -> &CelebrationState {
        self.machine.state()
    }

    pub fn is_celebrating(&self) -> bool {
        self.machine.is_active()
    }

    pub fn cursor(&self) -> &AnimationCursor {
        &self.cursor
    }

    pub fn frames(&self) -> Option<&FrameSet> {
        self.frames.as_ref()
    }

    /// Incremented on every frame rebuild.
    pub fn frame_generation(&self) -> u64 {
        self.frame_generation
    }

    /// Seconds the host should keep this plugin on screen per rotation slot.
    pub fn display_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.config.display_duration).unwrap_or(Duration::MAX)
    }

    /// Poll tick.
    ///
    /// In simulation mode the fetch is skipped and the canned win is armed
    /// whenever the machine is inactive.
    pub fn update(&mut self) -> PollReport {
        if !self.config.enabled {
            return PollReport::default();
        }
        let now = self.clock.now_utc();

        if self.config.simulate_win {
            let mut report = PollReport::default();
            if !self.machine.is_active() {
                self.trigger_simulation();
                report.activated = true;
            }
            report.expired = self.machine.check_expiry(now) == Transition::Expired;
            return report;
        }

        let report = self.machine.poll(self.feed.as_mut(), &self.config, now);
        if report.activated {
            self.rebuild_frames();
        }
        report
    }

    /// Render tick: advance the animation, stamp the overlay and present it.
    ///
    /// Returns `false` when there is nothing to celebrate or the sink failed,
    /// so the host can move on in its rotation. Any call while active consumes
    /// the live-priority signal.
    pub fn display(&mut self, sink: &mut dyn DisplaySink) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.machine.check_expiry(self.clock.now_utc());
        if !self.machine.is_active() {
            return false;
        }
        if self.frames.is_none() {
            self.rebuild_frames();
        }
        self.machine.consume_live_priority();

        let Some(set) = &self.frames else {
            return false;
        };
        let seq = set.frames();
        self.cursor.advance(self.clock.now_monotonic(), seq);

        let opts = OverlayOpts {
            banner_text: &self.config.banner_text,
            show_text: self.config.show_text,
            show_score: self.config.show_score,
            flash_on: self.cursor.flash_on,
        };
        let frame = overlay::compose(
            &seq.get(self.cursor.frame_index).image,
            self.machine.state().win.as_ref(),
            opts,
            &self.glyphs,
        );

        match sink.present(&frame) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to present celebration frame");
                false
            }
        }
    }

    /// One-shot takeover signal: true after each arming until the next render.
    ///
    /// Always false while disabled, since `display` never consumes it then.
    pub fn has_live_content(&self) -> bool {
        self.config.enabled && self.machine.has_live_content()
    }

    pub fn live_modes(&self) -> &'static [&'static str] {
        LIVE_MODES
    }

    pub fn vegas_content_type(&self) -> &'static str {
        if self.machine.is_active() {
            "static"
        } else {
            "none"
        }
    }

    pub fn vegas_display_mode(&self) -> VegasDisplayMode {
        if self.machine.is_active() {
            VegasDisplayMode::Static
        } else {
            VegasDisplayMode::FixedSegment
        }
    }

    /// Current base frame without the live overlay.
    pub fn vegas_content(&self) -> Option<&RgbImage> {
        if !self.machine.is_active() {
            return None;
        }
        let set = self.frames.as_ref()?;
        Some(&set.frames().get(self.cursor.frame_index).image)
    }

    /// Operator trigger: arm the canned win immediately.
    pub fn trigger_simulation(&mut self) {
        let win = WinRecord::simulated(&self.config.team_abbr);
        let now = self.clock.now_utc();
        self.machine
            .force_activate(win, self.config.celebration_window(), now);
        self.rebuild_frames();
        tracing::info!(
            hours = self.config.celebration_hours,
            "simulated win activated"
        );
    }

    /// Operator cancellation.
    pub fn cancel_celebration(&mut self) -> bool {
        let cancelled = self.machine.cancel() == Transition::Cancelled;
        if cancelled {
            tracing::info!("celebration cancelled");
        }
        cancelled
    }

    /// Apply a new configuration.
    ///
    /// Invalid configs are rejected and the current one stays in force. A valid
    /// config always rebuilds the frames; toggling `simulate_win` on triggers,
    /// toggling it off cancels.
    pub fn on_config_change(&mut self, new: CelebrationConfig) -> FlyResult<()> {
        if let Err(e) = new.validate() {
            tracing::error!(error = %e, "rejecting configuration update");
            return Err(e);
        }

        let was_simulating = self.config.simulate_win;
        self.config = new;
        self.glyphs = MonoGlyphs::resolve(&self.config.font_name, self.config.font_size);
        self.rebuild_frames();

        if self.config.simulate_win && !was_simulating {
            self.trigger_simulation();
        } else if !self.config.simulate_win && was_simulating && self.cancel_celebration() {
            tracing::info!("simulation cancelled");
        }

        tracing::info!("configuration updated");
        Ok(())
    }

    pub fn status(&self) -> CelebrationStatus {
        let state = self.machine.state();
        let iso = |t: chrono::DateTime<chrono::Utc>| t.to_rfc3339_opts(SecondsFormat::Secs, true);
        CelebrationStatus {
            active: state.active,
            expires_at: state.expires_at.map(iso),
            score_label: state.score_label.clone(),
            last_poll_time: self.machine.poll_clock().last_poll.map(iso),
            frames_decoded: self.frames.as_ref().is_some_and(FrameSet::is_decoded),
            frame_count: self.frames.as_ref().map_or(0, |f| f.frames().len()),
        }
    }

    /// Teardown: drop frames and all celebration state.
    pub fn cleanup(&mut self) {
        self.frames = None;
        self.machine.reset();
        self.cursor.reset();
        tracing::info!("celebration plugin cleaned up");
    }

    fn rebuild_frames(&mut self) {
        let params = SynthParams {
            frame_secs: self.config.synth_frame_secs(),
            show_text: self.config.show_text,
            show_score: self.config.show_score,
            banner_text: &self.config.banner_text,
            score_label: &self.machine.state().score_label,
            glyphs: &self.glyphs,
        };
        let set = self.source.build(&params);
        self.frames = Some(set);
        self.cursor.reset();
        self.frame_generation += 1;
    }
}

#[cfg(test)]
#[path = "../tests/unit/plugin.rs"]
mod tests;
