use crate::{
    error::ApiError,
    models::{SearchRequest, SearchResponse},
    services::RobotSearchService,
};
use actix_web::{
    web::{self, Json, Query},
    HttpResponse,
};

pub fn search_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/search")
            .route(web::get().to(search_get))
            .route(web::post().to(search_post)),
    );
}

/// Resolve a query passed as `?q=...`
pub async fn search_get(
    request: Query<SearchRequest>,
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse, ApiError> {
    run_search(&request.query, &search_service)
}

/// Resolve a query passed as a JSON body
pub async fn search_post(
    request: Json<SearchRequest>,
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse, ApiError> {
    run_search(&request.query, &search_service)
}

fn run_search(query: &str, search_service: &RobotSearchService) -> Result<HttpResponse, ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let result = search_service.search(query)?;
    Ok(HttpResponse::Ok().json(SearchResponse::from(&result)))
}
