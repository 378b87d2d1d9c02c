use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use guard_core::ReferenceDataset;
use guard_core::model::{AlertId, Verdict};
use guard_core::time::relative_label;

use crate::Clock;

/// Alert as shown on the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub id: AlertId,
    pub title: String,
    pub message: String,
    pub verdict: Verdict,
    pub age: String,
}

/// Home-feed alerts. Relative alert times count back from when the feed was
/// opened, i.e. when the service was built.
#[derive(Debug, Clone)]
pub struct AlertService {
    clock: Clock,
    opened_at: DateTime<Utc>,
    dataset: Arc<ReferenceDataset>,
}

impl AlertService {
    #[must_use]
    pub fn new(clock: Clock, dataset: Arc<ReferenceDataset>) -> Self {
        Self {
            clock,
            opened_at: clock.now(),
            dataset,
        }
    }

    #[must_use]
    pub fn with_opened_at(mut self, opened_at: DateTime<Utc>) -> Self {
        self.opened_at = opened_at;
        self
    }

    #[must_use]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Newest alerts first, at most `limit`.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<AlertView> {
        let now = self.clock.now();
        let mut alerts: Vec<_> = self
            .dataset
            .alerts()
            .iter()
            .map(|alert| (alert.raised_at(self.opened_at), alert))
            .collect();
        alerts.sort_by(|(a_at, a), (b_at, b)| b_at.cmp(a_at).then(a.id.cmp(&b.id)));
        alerts
            .into_iter()
            .take(limit)
            .map(|(raised_at, alert)| AlertView {
                id: alert.id,
                title: alert.title.clone(),
                message: alert.message.clone(),
                verdict: alert.verdict,
                age: relative_label(raised_at, now),
            })
            .collect()
    }
}
