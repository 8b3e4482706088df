#![forbid(unsafe_code)]
//! Win celebration for LED matrix scoreboards.
//!
//! When the monitored team wins a completed game, [`CelebrationPlugin`] takes
//! over the display for a configurable window and loops a waving "W" flag
//! animation with a flashing banner and the final score.

pub mod celebration;
pub mod config;
pub mod feed;
pub mod foundation;
pub mod frames;
pub mod plugin;
pub mod render;

pub use celebration::machine::{CelebrationMachine, PollReport, Transition};
pub use celebration::state::{CelebrationState, PollClock, WinRecord};
pub use config::CelebrationConfig;
pub use feed::scoreboard::{Scoreboard, find_win};
pub use feed::source::{FileFeed, ScoreboardFeed, StaticFeed};
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::Canvas;
pub use foundation::error::{FlyError, FlyResult};
pub use frames::sequence::{AnimationAsset, AnimationFrame, FrameSequence, FrameSet, FrameSource};
pub use plugin::{CelebrationPlugin, CelebrationStatus, LIVE_MODES, VegasDisplayMode};
pub use render::glyphs::{BitmapFont, GlyphRasterizer, MonoGlyphs};
pub use render::scheduler::AnimationCursor;
pub use render::sink::{DisplaySink, InMemorySink, PngSequenceSink};
