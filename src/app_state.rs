use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestionRepository, QuestionRepository},
    services::{
        completion_service::{CompletionService, OpenAiCompletionService},
        question_service::QuestionService,
        search_service::SearchService,
        tutor_service::TutorService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub tutor_service: Arc<TutorService>,
    pub search_service: Arc<SearchService>,
    pub jwt_service: JwtService,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(
            &db,
            &config.questions_collection,
        ));
        question_repository.ensure_indexes().await?;

        let completion = Arc::new(OpenAiCompletionService::new(&config));

        Self::from_parts(config, question_repository, completion, Some(db))
    }

    /// Wires the services around the given store and model. `db` is only used
    /// for readiness checks.
    pub fn from_parts(
        config: Config,
        question_repository: Arc<dyn QuestionRepository>,
        completion: Arc<dyn CompletionService>,
        db: Option<Database>,
    ) -> AppResult<Self> {
        let question_service = Arc::new(QuestionService::new(
            question_repository,
            Arc::clone(&completion),
        ));
        let tutor_service = Arc::new(TutorService::new(completion));
        let search_service = Arc::new(SearchService::new(&config)?);
        let jwt_service = JwtService::new(&config.jwt_secret);

        Ok(Self {
            question_service,
            tutor_service,
            search_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::MockQuestionRepository, services::completion_service::MockCompletionService,
    };

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_parts_without_database() {
        let state = AppState::from_parts(
            Config::test_config(),
            Arc::new(MockQuestionRepository::new()),
            Arc::new(MockCompletionService::new()),
            None,
        )
        .unwrap();

        assert!(state.db.is_none());
        assert_eq!(state.config.questions_collection, "questions");
    }
}
