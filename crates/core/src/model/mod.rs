mod alert;
mod entry;
mod ids;
mod lesson;
mod question;
mod verdict;

pub use ids::{AlertId, LessonId, ParseIdError, QuestionId};

pub use alert::{RaisedAt, ScamAlert};
pub use entry::{ClassificationResult, EntryError, ReferenceEntry, ReferenceEntryDraft};
pub use lesson::{Lesson, LessonError, LessonProgress};
pub use question::{Question, QuestionDraft, QuestionError};
pub use verdict::{ParseVerdictError, Verdict};
