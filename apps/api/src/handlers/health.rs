use crate::{models::HealthResponse, services::RobotSearchService};
use actix_web::{get, web, HttpResponse};

#[get("/health")]
pub async fn health_check(search_service: web::Data<RobotSearchService>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        robots: search_service.catalog_size(),
    })
}
