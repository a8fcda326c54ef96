use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{AskTutorRequest, GenerateQuestionsRequest},
        response::TutorResponse,
    },
};

#[post("/generateQuestions")]
async fn generate_questions(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionsRequest>,
    auth: AuthenticatedUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    log::info!(
        "[{}] {} requested questions for {} topic(s)",
        get_request_id(&req).unwrap_or_default(),
        auth.0.sub,
        request.topics.len()
    );

    let batch = state
        .question_service
        .provide_questions(&request.topics)
        .await?;
    Ok(HttpResponse::Ok().json(batch))
}

#[post("/getResponse")]
async fn get_response(
    state: web::Data<AppState>,
    request: web::Json<AskTutorRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let answer = state.tutor_service.answer(&request.question).await?;
    Ok(HttpResponse::Ok().json(TutorResponse::new(answer, "Got Response")))
}
