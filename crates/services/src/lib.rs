#![forbid(unsafe_code)]

pub mod alert_service;
pub mod app_services;
pub mod config;
pub mod error;
pub mod lesson_service;
pub mod quiz;
pub mod scan_service;

pub use guard_core::Clock;

pub use alert_service::{AlertService, AlertView};
pub use app_services::{AppServices, load_dataset};
pub use config::GuardConfig;
pub use error::{ConfigError, ScanError, ServiceError};
pub use lesson_service::{LessonListItem, LessonService};
pub use quiz::{QuizListItem, QuizProgress, QuizSession, QuizStatus};
pub use scan_service::{ScanReport, ScanService};
