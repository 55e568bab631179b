use actix_web::web;

use super::handlers;
use crate::error::TriageError;

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| TriageError::InvalidRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(handlers::health))
    .service(
        web::scope("/api")
            .route("/analysis", web::post().to(handlers::analyze))
            .route("/vitals/risk", web::post().to(handlers::score_vitals))
            .route("/cases", web::post().to(handlers::create_case))
            .route("/cases", web::get().to(handlers::list_cases))
            .route("/cases/{id}", web::get().to(handlers::get_case))
            .route("/cases/{id}/status", web::put().to(handlers::update_status)),
    );
}
