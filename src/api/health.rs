use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use tracing::error;

use crate::api::job::JobService;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn probe_database(service: &JobService, up: &str, down: &str) -> HttpResponse {
    match service.ping().await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: up.to_string(),
            database: "connected".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("{} check failed: {}", up, e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: down.to_string(),
                database: "disconnected".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

/// Health check including database connectivity, for load balancers and uptime monitors
#[get("/health")]
async fn health_check(service: web::Data<JobService>) -> impl Responder {
    probe_database(&service, "healthy", "unhealthy").await
}

/// Readiness probe: 503 while the database is unreachable
#[get("/ready")]
async fn readiness_check(service: web::Data<JobService>) -> impl Responder {
    probe_database(&service, "ready", "not_ready").await
}

/// Liveness probe; does not touch dependencies
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        database: "not_checked".to_string(),
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
