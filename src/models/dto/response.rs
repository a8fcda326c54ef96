use async_graphql::SimpleObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Study answer returned by the tutor chat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, SimpleObject, JsonSchema)]
pub struct TutorAnswer {
    pub ai_response: String,
    pub topic: String,
}

pub type TutorResponse = ApiResponse<TutorAnswer>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<serde_json::Value>,
}

impl SearchResponse {
    pub fn ok(data: Vec<serde_json::Value>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
