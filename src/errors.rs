use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

pub const MISSING_TOPICS_MESSAGE: &str = "Missing or empty details";
pub const ALL_TOPICS_FAILED_MESSAGE: &str = "Failed to generate Question for all topics";

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Generative service error: {0}")]
    ProviderError(String),

    #[error("Failed to generate Question for all topics")]
    AllTopicsFailed,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::ProviderError(_) => "PROVIDER_ERROR",
            AppError::AllTopicsFailed => "ALL_TOPICS_FAILED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

/// Why a single topic of a batch could not be served.
///
/// These never escape the topic's own task: the provider renders them into the
/// `error` string of a failed topic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionGenerationError {
    #[error("Failed to parse generated questions: {0}")]
    Parse(String),

    #[error("AI returned only {0} questions, expected at least {1}")]
    InsufficientQuestions(usize, usize),

    #[error("Generated question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("Question store error: {0}")]
    Persistence(String),

    #[error("Generative service error: {0}")]
    Provider(String),
}

impl From<AppError> for QuestionGenerationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ProviderError(msg) => QuestionGenerationError::Provider(msg),
            AppError::DatabaseError(msg) => QuestionGenerationError::Persistence(msg),
            other => QuestionGenerationError::Persistence(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            AppError::AllTopicsFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::InternalError(format!("HTTP client error: {}", err))
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;
