use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Time source for the celebration module.
///
/// Wall-clock time drives the celebration window and poll throttling; the
/// monotonic clock drives frame and flash timers so clock adjustments never
/// make the animation jump.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
    fn now_monotonic(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_monotonic(&self) -> Instant {
        Instant::now()
    }
}

/// Manually driven clock for tests and offline rendering.
///
/// Both time bases move together on [`ManualClock::advance`].
#[derive(Debug)]
pub struct ManualClock {
    wall_origin: DateTime<Utc>,
    mono_origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new(wall_origin: DateTime<Utc>) -> Self {
        Self {
            wall_origin,
            mono_origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *elapsed += by;
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        let elapsed = self.elapsed();
        let delta = chrono::Duration::from_std(elapsed).unwrap_or(chrono::Duration::MAX);
        self.wall_origin
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn now_monotonic(&self) -> Instant {
        self.mono_origin + self.elapsed()
    }
}
