mod progress;
mod session;
mod view;

// Public API of the quiz subsystem.
pub use progress::QuizProgress;
pub use session::QuizSession;
pub use view::{QuizListItem, QuizStatus};
