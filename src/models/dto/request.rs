use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Body of `POST /api/v1/chat/generateQuestions`.
///
/// `topics` that is missing, null or anything but an array of strings reads as
/// an empty list, so the provider rejects it with its own message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateQuestionsRequest {
    #[serde(default, deserialize_with = "topics_or_empty")]
    pub topics: Vec<String>,
}

fn topics_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let topics = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(topic) => Some(topic),
                _ => None,
            })
            .collect::<Option<Vec<String>>>()
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    Ok(topics)
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AskTutorRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 4000, message = "Question is required"))]
    pub question: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    #[validate(length(min = 1, max = 300, message = "Query parameter is required"))]
    pub query: String,
}
