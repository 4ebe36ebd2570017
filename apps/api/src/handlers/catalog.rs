use crate::{error::Result, services::RobotSearchService};
use actix_web::{post, web, HttpResponse};
use log::info;
use serde_json::json;

/// Re-read the catalog file and atomically replace the active catalog
#[post("/catalog/reload")]
pub async fn reload_catalog(
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse> {
    let robots = search_service.reload().await?;
    info!("Catalog reloaded with {} robots", robots);

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "robots": robots,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
