use std::sync::Arc;

use tracing::info;

use guard_core::ReferenceDataset;

use crate::Clock;
use crate::alert_service::AlertService;
use crate::config::GuardConfig;
use crate::error::ServiceError;
use crate::lesson_service::LessonService;
use crate::quiz::QuizSession;
use crate::scan_service::ScanService;

/// Read the configured dataset, or the builtin seed when none is configured.
///
/// # Errors
///
/// Returns `ServiceError::Io` if the file cannot be read and
/// `ServiceError::Dataset` if it does not validate.
pub fn load_dataset(config: &GuardConfig) -> Result<ReferenceDataset, ServiceError> {
    match &config.dataset_path {
        Some(path) => {
            info!(path = %path.display(), "loading reference dataset from file");
            let json = std::fs::read_to_string(path).map_err(|source| ServiceError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(ReferenceDataset::from_json_str(&json)?)
        }
        None => Ok(ReferenceDataset::builtin()?),
    }
}

/// Assembles app-facing services around one shared dataset.
#[derive(Debug, Clone)]
pub struct AppServices {
    clock: Clock,
    dataset: Arc<ReferenceDataset>,
    scan: Arc<ScanService>,
    alerts: Arc<AlertService>,
}

impl AppServices {
    /// Build services from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the dataset cannot be loaded.
    pub fn load(config: &GuardConfig, clock: Clock) -> Result<Self, ServiceError> {
        let dataset = load_dataset(config)?;
        Ok(Self::with_dataset(dataset, config, clock))
    }

    #[must_use]
    pub fn with_dataset(dataset: ReferenceDataset, config: &GuardConfig, clock: Clock) -> Self {
        let dataset = Arc::new(dataset);
        let scan = Arc::new(
            ScanService::new(clock, Arc::clone(&dataset)).with_delay(config.scan_delay),
        );
        let alerts = Arc::new(AlertService::new(clock, Arc::clone(&dataset)));
        Self {
            clock,
            dataset,
            scan,
            alerts,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn dataset(&self) -> Arc<ReferenceDataset> {
        Arc::clone(&self.dataset)
    }

    #[must_use]
    pub fn scan(&self) -> Arc<ScanService> {
        Arc::clone(&self.scan)
    }

    #[must_use]
    pub fn alerts(&self) -> Arc<AlertService> {
        Arc::clone(&self.alerts)
    }

    /// Start an empty quiz session.
    #[must_use]
    pub fn quiz_session(&self) -> QuizSession {
        QuizSession::new(Arc::clone(&self.dataset))
    }

    /// Start lesson tracking with nothing completed.
    #[must_use]
    pub fn lesson_service(&self) -> LessonService {
        LessonService::new(Arc::clone(&self.dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guard_core::time::fixed_clock;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn load_defaults_to_builtin_dataset() {
        let config = GuardConfig::default().with_scan_delay(Duration::ZERO);
        let services = AppServices::load(&config, fixed_clock()).unwrap();
        assert_eq!(services.dataset().entries().len(), 5);
        assert_eq!(services.scan().delay(), Duration::ZERO);
        assert_eq!(services.quiz_session().progress().total, 3);
    }

    #[test]
    fn missing_dataset_file_is_io_error() {
        let config = GuardConfig::default().with_dataset_path("/nonexistent/guard/apps.json");
        let err = load_dataset(&config).unwrap_err();
        assert!(
            matches!(err, ServiceError::Io { ref path, .. } if path == &PathBuf::from("/nonexistent/guard/apps.json"))
        );
    }
}
