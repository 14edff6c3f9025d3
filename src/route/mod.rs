pub mod auth;
pub mod health;

use actix_web::{web, HttpResponse};

use crate::error::ApiError;

pub async fn default_handler() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Mounts every route group of the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/healthcheck", web::get().to(health::healthcheck))
        .service(web::scope("/api/auth").configure(auth::configure))
        // course catalogue routes live under this group
        .service(web::scope("/courses"))
        .default_service(web::route().to(default_handler));
}
