use std::time::{Duration, Instant};

use crate::frames::sequence::FrameSequence;

pub const DEFAULT_FLASH_PERIOD: Duration = Duration::from_millis(500);

/// What changed during one [`AnimationCursor::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    pub frame_advanced: bool,
    pub flash_toggled: bool,
}

/// Frame and flash phase of the running animation.
///
/// Both timers run on the monotonic clock and step at most once per call:
/// a slow render loop skips frames instead of catching up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationCursor {
    pub frame_index: usize,
    /// `None` until the first advance, which always steps.
    pub last_advance: Option<Instant>,
    pub flash_on: bool,
    /// `None` until the first advance, which only starts the flash timer.
    pub last_flash_toggle: Option<Instant>,
    pub flash_period: Duration,
}

impl Default for AnimationCursor {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_PERIOD)
    }
}

impl AnimationCursor {
    pub fn new(flash_period: Duration) -> Self {
        Self {
            frame_index: 0,
            last_advance: None,
            flash_on: true,
            last_flash_toggle: None,
            flash_period,
        }
    }

    /// Rewind to frame 0 with the flash shown, keeping the flash period.
    pub fn reset(&mut self) {
        *self = Self::new(self.flash_period);
    }

    pub fn advance(&mut self, now: Instant, frames: &FrameSequence) -> Tick {
        let mut tick = Tick::default();

        let due = match self.last_advance {
            None => true,
            Some(last) => {
                let current = frames.get(self.frame_index);
                now.saturating_duration_since(last).as_secs_f64() >= current.duration_secs
            }
        };
        if due {
            self.frame_index = (self.frame_index + 1) % frames.len();
            self.last_advance = Some(now);
            tick.frame_advanced = true;
        }

        match self.last_flash_toggle {
            // Banner starts visible; the first toggle hides it one period later.
            None => self.last_flash_toggle = Some(now),
            Some(last) if now.saturating_duration_since(last) >= self.flash_period => {
                self.flash_on = !self.flash_on;
                self.last_flash_toggle = Some(now);
                tick.flash_toggled = true;
            }
            Some(_) => {}
        }

        tick
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
