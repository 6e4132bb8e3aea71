use actix_web::HttpResponse;

use craiyon_shared::{ApiResponse, HealthResponse};

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "craiyon-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Handler for GET /api/v1
pub async fn api_version() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("v1"))
}
