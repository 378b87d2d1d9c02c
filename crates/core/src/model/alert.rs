use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AlertId, Verdict};
use crate::time::{minutes_before, relative_label};

/// When an alert was raised.
///
/// Seed data uses `minutes_ago`, measured from when the feed is opened, so a
/// shipped alert keeps reading "2 hours ago". Alerts from a live source carry
/// an absolute `raised_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaisedAt {
    At { raised_at: DateTime<Utc> },
    Ago { minutes_ago: u32 },
}

impl RaisedAt {
    /// Absolute instant, resolving relative times against `opened_at`.
    #[must_use]
    pub fn resolve(self, opened_at: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            RaisedAt::At { raised_at } => raised_at,
            RaisedAt::Ago { minutes_ago } => minutes_before(opened_at, minutes_ago),
        }
    }
}

/// A broadcast warning about a circulating scam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamAlert {
    pub id: AlertId,
    pub title: String,
    pub message: String,
    pub verdict: Verdict,
    #[serde(flatten)]
    pub raised: RaisedAt,
}

impl ScamAlert {
    #[must_use]
    pub fn raised_at(&self, opened_at: DateTime<Utc>) -> DateTime<Utc> {
        self.raised.resolve(opened_at)
    }

    /// Human-readable age at `now`, e.g. `2 hours ago`, for a feed opened at
    /// `opened_at`.
    #[must_use]
    pub fn age_label(&self, opened_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
        relative_label(self.raised_at(opened_at), now)
    }
}
