use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    Cached,    // served from previously stored questions
    Generated, // produced by the model during this call
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct TopicResult {
    pub topic: String,
    pub questions: Vec<Question>,
    pub source: QuestionSource,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct FailedTopic {
    pub topic: String,
    pub error: String,
}

/// Outcome of one batch call. Only built when at least one topic succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionBatch {
    pub topics: Vec<TopicResult>,
    #[serde(rename = "failedTopics")]
    pub failed_topics: Vec<FailedTopic>,
}

#[cfg(test)]
impl QuestionBatch {
    pub fn find_topic(&self, topic: &str) -> Option<&TopicResult> {
        self.topics.iter().find(|t| t.topic == topic)
    }

    pub fn find_failed(&self, topic: &str) -> Option<&FailedTopic> {
        self.failed_topics.iter().find(|t| t.topic == topic)
    }
}
