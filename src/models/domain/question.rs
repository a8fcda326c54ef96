use std::collections::BTreeMap;

use async_graphql::{ComplexObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Labels every stored question uses for its four choices.
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// One multiple-choice question cached under a topic.
///
/// Records are written once by the question provider and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[graphql(complex)]
pub struct Question {
    pub id: String,
    pub topic: String,
    pub question: String,
    #[graphql(skip)]
    pub options: BTreeMap<String, String>, // label -> choice text
    pub correct: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct QuestionOption {
    pub label: String,
    pub text: String,
}

#[ComplexObject]
impl Question {
    /// Choices ordered by label.
    async fn choices(&self) -> Vec<QuestionOption> {
        self.options
            .iter()
            .map(|(label, text)| QuestionOption {
                label: label.clone(),
                text: text.clone(),
            })
            .collect()
    }
}

impl Question {
    pub fn new(
        topic: &str,
        question: &str,
        options: BTreeMap<String, String>,
        correct: &str,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            question: question.to_string(),
            options,
            correct: correct.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn has_valid_shape(&self) -> bool {
        self.options.len() == OPTION_LABELS.len()
            && OPTION_LABELS.iter().all(|l| self.options.contains_key(*l))
            && self.options.contains_key(&self.correct)
    }
}
