use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppResult,
    models::{domain::QuestionBatch, dto::response::TutorAnswer},
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Serves every topic from the cache or the model; failed topics are
    /// listed in `failedTopics`.
    async fn generate_questions(
        &self,
        ctx: &Context<'_>,
        topics: Vec<String>,
    ) -> AppResult<QuestionBatch> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        log::info!(
            "GraphQL question batch for {} topic(s) by {}",
            topics.len(),
            claims.sub
        );

        state.question_service.provide_questions(&topics).await
    }

    async fn ask_tutor(&self, ctx: &Context<'_>, question: String) -> AppResult<TutorAnswer> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        state.tutor_service.answer(&question).await
    }
}
