use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::SearchQuery, response::SearchResponse},
};

#[get("/youtube/search")]
async fn search_videos(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let items = state.search_service.search_videos(&query.query).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::ok(items)))
}

#[get("/wikipedia/search")]
async fn search_articles(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let results = state.search_service.search_articles(&query.query).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::ok(results)))
}
