pub mod question;
pub mod topic_result;
pub use question::{Question, QuestionOption, OPTION_LABELS};
pub use topic_result::{FailedTopic, QuestionBatch, QuestionSource, TopicResult};
