use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::database::{self, ReadyState};

#[derive(Serialize)]
struct HealthReport {
    message: &'static str,
    database: String,
}

pub async fn healthcheck(pool: web::Data<database::Pool>) -> HttpResponse {
    let pool = pool.get_ref().clone();
    let state = web::block(move || database::ready_state(&pool))
        .await
        .unwrap_or(ReadyState::Disconnected);

    HttpResponse::Ok().json(HealthReport {
        message: "Backend is healthy",
        database: state.to_string(),
    })
}
