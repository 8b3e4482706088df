use chrono::{DateTime, Utc};

/// Result of a completed game the monitored team won.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WinRecord {
    pub team_abbr: String,
    pub opponent_abbr: String,
    pub team_score: u32,
    pub opponent_score: u32,
}

impl WinRecord {
    /// Canned result used by simulation mode.
    pub fn simulated(team_abbr: &str) -> Self {
        Self {
            team_abbr: team_abbr.to_owned(),
            opponent_abbr: "SIM".to_owned(),
            team_score: 7,
            opponent_score: 4,
        }
    }

    /// `"<team>-<opponent>"`, e.g. `"7-4"`. Identifies a win across polls.
    pub fn score_label(&self) -> String {
        format!("{}-{}", self.team_score, self.opponent_score)
    }
}

/// Celebration state owned by [`CelebrationMachine`](super::machine::CelebrationMachine).
///
/// `expires_at` and `score_label` may hold stale values while inactive; they
/// are only meaningful when `active` is set. `win` is always present while
/// active.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CelebrationState {
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub win: Option<WinRecord>,
    pub score_label: String,
    pub live_priority_consumed: bool,
}

/// Throttle bookkeeping for scoreboard fetches (wall clock).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollClock {
    pub last_poll: Option<DateTime<Utc>>,
}
