use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppResult,
    models::domain::Question,
};

const DEFAULT_CACHED_LIMIT: i64 = 10;
const MAX_CACHED_LIMIT: i64 = 50;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Questions already stored for a topic, without calling the model.
    async fn cached_questions(
        &self,
        ctx: &Context<'_>,
        topic: String,
        limit: Option<i64>,
    ) -> AppResult<Vec<Question>> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        let limit = limit
            .unwrap_or(DEFAULT_CACHED_LIMIT)
            .clamp(1, MAX_CACHED_LIMIT);

        state.question_service.cached_questions(&topic, limit).await
    }
}
