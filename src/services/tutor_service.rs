use std::sync::Arc;

use crate::{
    constants::prompts::{study_assistant_prompt, STUDY_ASSISTANT_SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::dto::response::TutorAnswer,
    services::completion_service::{CompletionRequest, CompletionService},
};

pub struct TutorService {
    completion: Arc<dyn CompletionService>,
}

impl TutorService {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn answer(&self, question: &str) -> AppResult<TutorAnswer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::ValidationError("Question is required".to_string()));
        }

        let raw = self
            .completion
            .complete(CompletionRequest::json(
                STUDY_ASSISTANT_SYSTEM_PROMPT,
                study_assistant_prompt(question),
            ))
            .await?;

        log::debug!("Tutor reply received ({} bytes)", raw.len());

        serde_json::from_str::<TutorAnswer>(raw.trim()).map_err(|e| {
            log::error!("Tutor reply was not the expected JSON object: {}", e);
            AppError::InternalError(format!(
                "Something went wrong while parsing the JSON: {}",
                e
            ))
        })
    }
}
