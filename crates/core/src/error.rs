use thiserror::Error;

use crate::dataset::DatasetError;
use crate::model::{EntryError, LessonError, ParseIdError, ParseVerdictError, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
    #[error(transparent)]
    ParseVerdict(#[from] ParseVerdictError),
}
