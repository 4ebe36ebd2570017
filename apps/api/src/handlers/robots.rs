//! Direct catalog lookups, bypassing query resolution

use crate::{
    error::ApiError,
    models::{Robot, RobotsResponse},
    services::RobotSearchService,
};
use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

pub fn robots_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/robots")
            .service(by_number)
            .service(by_prefix)
            .service(by_tag)
            .service(random),
    );
}

fn found(robots: Vec<Arc<Robot>>, what: String) -> Result<HttpResponse, ApiError> {
    if robots.is_empty() {
        return Err(ApiError::NotFound(what));
    }
    Ok(HttpResponse::Ok().json(RobotsResponse::from_arcs(&robots)))
}

#[get("/number/{number}")]
pub async fn by_number(
    path: web::Path<i64>,
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse, ApiError> {
    let number = path.into_inner();
    found(
        search_service.by_number(number)?,
        format!("No robot with number {}", number),
    )
}

#[get("/prefix/{prefix}")]
pub async fn by_prefix(
    path: web::Path<String>,
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse, ApiError> {
    let prefix = path.into_inner();
    found(
        search_service.by_name_prefix(&prefix)?,
        format!("No robot named {}bot", prefix),
    )
}

#[get("/tag/{tag}")]
pub async fn by_tag(
    path: web::Path<String>,
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse, ApiError> {
    let tag = path.into_inner();
    found(
        search_service.by_tag(&tag)?,
        format!("No robots tagged {}", tag),
    )
}

#[get("/random")]
pub async fn random(
    search_service: web::Data<RobotSearchService>,
) -> Result<HttpResponse, ApiError> {
    let robots = search_service.random()?.into_iter().collect();
    found(robots, "The catalog is empty".to_string())
}
