pub mod chat_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod search_handler;

use actix_web::web;

use crate::{app_state::AppState, auth::AuthMiddleware, errors::AppError, graphql::create_schema};

pub use chat_handler::{generate_questions, get_response};
pub use graphql_handler::graphql;
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use search_handler::{search_articles, search_videos};

/// Registers shared state and every route of the service.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let schema = create_schema(state.clone());

        cfg.app_data(web::Data::new(state.jwt_service.clone()))
            .app_data(web::Data::new(schema))
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))
            .service(health_check)
            .service(health_check_live)
            .service(health_check_ready)
            .service(
                web::scope("/api/v1/chat")
                    .wrap(AuthMiddleware)
                    .service(generate_questions)
                    .service(get_response),
            )
            .service(
                web::resource("/api/v1/graphql")
                    .wrap(AuthMiddleware)
                    .route(web::post().to(graphql)),
            )
            .service(
                web::scope("/api/v1")
                    .service(search_videos)
                    .service(search_articles),
            );
    }
}
