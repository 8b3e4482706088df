use chrono::{DateTime, Utc};

use crate::celebration::state::{CelebrationState, PollClock, WinRecord};
use crate::config::CelebrationConfig;
use crate::feed::scoreboard::{Scoreboard, find_win};
use crate::feed::source::ScoreboardFeed;
use crate::foundation::error::FlyResult;

/// Outcome of a single state-machine step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// Inactive -> Active, or a re-arm for a different win. Frames must be rebuilt.
    Activated,
    Expired,
    Cancelled,
}

/// Summary of one poll tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    /// The remote fetch ran (not throttled, not simulated).
    pub fetched: bool,
    pub activated: bool,
    pub expired: bool,
}

/// Win detection and the active/inactive celebration window.
///
/// The machine is the only writer of [`CelebrationState`] and [`PollClock`].
/// Time is always passed in so every transition is a pure function of the
/// inputs.
#[derive(Clone, Debug, Default)]
pub struct CelebrationMachine {
    state: CelebrationState,
    poll_clock: PollClock,
}

impl CelebrationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CelebrationState {
        &self.state
    }

    pub fn poll_clock(&self) -> PollClock {
        self.poll_clock
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Run one poll tick: throttled fetch, win detection, then expiry.
    ///
    /// Fetch and payload failures are logged and count as "no new information";
    /// they never change state. The expiry check runs on every call, throttled or
    /// not.
    pub fn poll(
        &mut self,
        feed: &mut dyn ScoreboardFeed,
        cfg: &CelebrationConfig,
        now: DateTime<Utc>,
    ) -> PollReport {
        let mut report = PollReport::default();

        if let Some(last) = self.poll_clock.last_poll {
            let elapsed = now - last;
            let interval = chrono::Duration::from_std(cfg.poll_interval())
                .unwrap_or(chrono::Duration::MAX);
            if elapsed < interval {
                tracing::debug!(
                    elapsed_secs = elapsed.num_seconds(),
                    "skipping scoreboard fetch, polled recently"
                );
                report.expired = self.check_expiry(now) == Transition::Expired;
                return report;
            }
        }

        report.fetched = true;
        match self.fetch_and_observe(feed, cfg, now) {
            Ok(t) => report.activated = t == Transition::Activated,
            Err(e) => tracing::error!(error = %e, "scoreboard update failed"),
        }
        self.poll_clock.last_poll = Some(now);

        report.expired = self.check_expiry(now) == Transition::Expired;
        report
    }

    fn fetch_and_observe(
        &mut self,
        feed: &mut dyn ScoreboardFeed,
        cfg: &CelebrationConfig,
        now: DateTime<Utc>,
    ) -> FlyResult<Transition> {
        let Some(payload) = feed.fetch(&cfg.scoreboard_url)? else {
            tracing::warn!(url = %cfg.scoreboard_url, "no data returned from scoreboard feed");
            return Ok(Transition::Unchanged);
        };
        let board = Scoreboard::from_value(payload)?;
        if board.events.is_empty() {
            tracing::debug!("scoreboard has no events");
        }
        self.observe(&board, cfg, now)
    }

    /// Apply a decoded scoreboard snapshot.
    pub fn observe(
        &mut self,
        board: &Scoreboard,
        cfg: &CelebrationConfig,
        now: DateTime<Utc>,
    ) -> FlyResult<Transition> {
        let Some(win) = find_win(board, &cfg.team_abbr)? else {
            return Ok(Transition::Unchanged);
        };
        Ok(self.record_win(win, cfg.celebration_window(), now))
    }

    /// Arm the window for a detected win.
    ///
    /// A win carrying the score label of the celebration already running is a
    /// no-op; a different label re-arms expiry and live priority.
    pub fn record_win(
        &mut self,
        win: WinRecord,
        window: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Transition {
        let label = win.score_label();
        if self.state.active && self.state.score_label == label {
            return Transition::Unchanged;
        }

        tracing::info!(
            team = %win.team_abbr,
            team_score = win.team_score,
            opponent = %win.opponent_abbr,
            opponent_score = win.opponent_score,
            window_secs = window.num_seconds(),
            "win detected, celebrating"
        );
        self.arm(win, label, window, now);
        Transition::Activated
    }

    /// Operator trigger: activate unconditionally, bypassing the fetch.
    pub fn force_activate(
        &mut self,
        win: WinRecord,
        window: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Transition {
        let label = win.score_label();
        self.arm(win, label, window, now);
        Transition::Activated
    }

    fn arm(
        &mut self,
        win: WinRecord,
        label: String,
        window: chrono::Duration,
        now: DateTime<Utc>,
    ) {
        let expires_at = now
            .checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.state.active = true;
        self.state.expires_at = Some(expires_at);
        self.state.win = Some(win);
        self.state.score_label = label;
        self.state.live_priority_consumed = false;
    }

    /// Deactivate once `now >= expires_at`. Never fires early.
    pub fn check_expiry(&mut self, now: DateTime<Utc>) -> Transition {
        if !self.state.active {
            return Transition::Unchanged;
        }
        match self.state.expires_at {
            Some(expires_at) if now >= expires_at => {
                self.state.active = false;
                tracing::info!(%expires_at, "celebration window expired");
                Transition::Expired
            }
            _ => Transition::Unchanged,
        }
    }

    /// Operator cancellation.
    pub fn cancel(&mut self) -> Transition {
        if !self.state.active {
            return Transition::Unchanged;
        }
        self.state.active = false;
        Transition::Cancelled
    }

    /// True while active until the first render after arming.
    pub fn has_live_content(&self) -> bool {
        self.state.active && !self.state.live_priority_consumed
    }

    pub fn consume_live_priority(&mut self) {
        self.state.live_priority_consumed = true;
    }

    /// Drop everything except the poll clock.
    pub fn reset(&mut self) {
        self.state = CelebrationState::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/celebration/machine.rs"]
mod tests;
