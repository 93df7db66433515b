pub mod header;
pub mod question;

pub use header::HeaderLabels;
pub use question::{AnswerIndex, QuestionRecord};
