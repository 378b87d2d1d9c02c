use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use guard_core::ReferenceDataset;
use guard_core::classify;
use guard_core::model::{ClassificationResult, Verdict};

use crate::Clock;
use crate::config::DEFAULT_SCAN_DELAY;
use crate::error::ScanError;

/// Outcome of a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub result: ClassificationResult,
    pub scanned_at: DateTime<Utc>,
}

/// Checks a user-typed app name or URL against the reference dataset.
#[derive(Debug, Clone)]
pub struct ScanService {
    clock: Clock,
    dataset: Arc<ReferenceDataset>,
    delay: Duration,
}

impl ScanService {
    #[must_use]
    pub fn new(clock: Clock, dataset: Arc<ReferenceDataset>) -> Self {
        Self {
            clock,
            dataset,
            delay: DEFAULT_SCAN_DELAY,
        }
    }

    /// Set the simulated scan delay. `Duration::ZERO` classifies immediately.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Scan `raw` after the configured delay.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::EmptyQuery` if `raw` is blank. Classification itself never fails.
    pub async fn scan(&self, raw: &str) -> Result<ScanReport, ScanError> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(ScanError::EmptyQuery);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = classify(query, self.dataset.entries());
        info!(query, verdict = %result.verdict, known = !result.is_fallback(), "scan completed");

        Ok(ScanReport {
            result,
            scanned_at: self.clock.now(),
        })
    }

    /// One known identifier per verdict, in severity order, for "try these" hints.
    #[must_use]
    pub fn sample_queries(&self) -> Vec<(Verdict, String)> {
        Verdict::all()
            .into_iter()
            .filter_map(|verdict| {
                self.dataset
                    .entries()
                    .iter()
                    .find(|entry| entry.verdict() == verdict)
                    .map(|entry| (verdict, entry.identifier_url().to_string()))
            })
            .collect()
    }
}
