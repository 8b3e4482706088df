use anyhow::Context as _;

use crate::celebration::state::WinRecord;
use crate::foundation::error::{FlyError, FlyResult};

/// Competition state marking a completed game.
pub const STATE_FINAL: &str = "post";

/// Scoreboard snapshot, reduced to the fields the win detector reads.
///
/// Every level is lenient: absent keys decode as empty values, the same way a
/// missing key would read on the remote side.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Scoreboard {
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Event {
    pub competitions: Vec<Competition>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Competition {
    pub status: Status,
    pub competitors: Vec<Competitor>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(rename = "type")]
    pub kind: StatusType,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StatusType {
    pub state: String,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Competitor {
    #[serde(rename = "homeAway")]
    pub home_away: String,
    pub team: Team,
    pub score: Option<Score>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Team {
    pub abbreviation: String,
}

/// Score as published: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum Score {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Score {
    /// Final score in runs. Empty strings count as zero.
    pub fn points(&self) -> FlyResult<u32> {
        match self {
            Self::Int(v) => u32::try_from(*v)
                .map_err(|_| FlyError::feed(format!("score out of range: {v}"))),
            Self::Float(v) if v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX) => {
                Ok(v.trunc() as u32)
            }
            Self::Float(v) => Err(FlyError::feed(format!("score out of range: {v}"))),
            Self::Text(s) if s.trim().is_empty() => Ok(0),
            Self::Text(s) => s
                .trim()
                .parse::<u32>()
                .with_context(|| format!("parse score '{s}'"))
                .map_err(|e| FlyError::feed(format!("{e:#}"))),
        }
    }
}

impl Competition {
    fn side(&self, home_away: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.home_away == home_away)
    }
}

impl Competitor {
    fn points(&self) -> FlyResult<u32> {
        self.score.as_ref().map_or(Ok(0), Score::points)
    }
}

impl Scoreboard {
    pub fn from_value(v: serde_json::Value) -> FlyResult<Self> {
        serde_json::from_value(v)
            .context("decode scoreboard payload")
            .map_err(|e| FlyError::feed(format!("{e:#}")))
    }
}

/// Scan a scoreboard for the first completed game `team` won.
///
/// Only the first competition of each event is examined. Losses and ties are
/// skipped and scanning continues, so a doubleheader win after a loss still
/// counts; the first qualifying win ends the scan.
pub fn find_win(board: &Scoreboard, team: &str) -> FlyResult<Option<WinRecord>> {
    for event in &board.events {
        let Some(competition) = event.competitions.first() else {
            continue;
        };
        if competition.status.kind.state != STATE_FINAL {
            continue;
        }

        let (Some(home), Some(away)) = (competition.side("home"), competition.side("away")) else {
            continue;
        };

        let (ours, theirs) = if home.team.abbreviation == team {
            (home, away)
        } else if away.team.abbreviation == team {
            (away, home)
        } else {
            continue;
        };

        let team_score = ours.points()?;
        let opponent_score = theirs.points()?;
        if team_score <= opponent_score {
            tracing::debug!(
                team,
                opponent = %theirs.team.abbreviation,
                team_score,
                opponent_score,
                "no win in completed game, skipping"
            );
            continue;
        }

        return Ok(Some(WinRecord {
            team_abbr: team.to_owned(),
            opponent_abbr: theirs.team.abbreviation.clone(),
            team_score,
            opponent_score,
        }));
    }
    Ok(None)
}

#[cfg(test)]
#[path = "../../tests/unit/feed/scoreboard.rs"]
mod tests;
