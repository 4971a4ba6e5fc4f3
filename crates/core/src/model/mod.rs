mod answer;
mod ids;
mod progress;
mod question;

pub use answer::{AnswerResult, SubmitOutcome};
pub use ids::QuestionKey;
pub use progress::ProgressState;
pub use question::{QuestionLookup, QuestionView, QuizQuestion};
