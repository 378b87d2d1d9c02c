#![forbid(unsafe_code)]

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod model;
pub mod quiz;
pub mod time;

pub use classifier::classify;
pub use dataset::{DatasetError, DatasetFile, ReferenceDataset};
pub use error::Error;
pub use quiz::{AnswerFeedback, ProgressState, QuizEngine};
pub use time::Clock;
