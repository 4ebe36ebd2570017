use actix_web::{web, Scope};

use crate::handlers::{health_check, reload_catalog, robots_config, search_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(health_check)
        .service(reload_catalog)
        .configure(search_config)
        .configure(robots_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crate::config::test_search_config;
    use crate::models::robot::test_robot;
    use crate::search::QueryResolver;
    use crate::services::RobotSearchService;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::path::PathBuf;

    fn service() -> web::Data<RobotSearchService> {
        let snapshot = CatalogSnapshot::build(vec![
            test_robot(7, "Speedbot", &["fast"]),
            test_robot(42, "Tinybot", &["small"]),
        ])
        .unwrap();

        web::Data::new(RobotSearchService::new(
            snapshot,
            QueryResolver::new(test_search_config()),
            PathBuf::from("/nonexistent/robots.json"),
        ))
    }

    #[actix_web::test]
    async fn test_search_by_query_string() {
        let app = test::init_service(App::new().app_data(service()).service(api_routes())).await;

        let request = test::TestRequest::get()
            .uri("/api/search?q=robot%2042")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["kind"], "search");
        assert_eq!(body["robots"][0]["name"], "Tinybot");
        assert_eq!(body["robots"][0]["name_prefix"], "tiny");
    }

    #[actix_web::test]
    async fn test_search_by_json_body() {
        let app = test::init_service(App::new().app_data(service()).service(api_routes())).await;

        let request = test::TestRequest::post()
            .uri("/api/search")
            .set_json(serde_json::json!({ "query": "state of bang" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["kind"], "easter-egg");
        assert_eq!(body["robots"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_empty_query_is_rejected() {
        let app = test::init_service(App::new().app_data(service()).service(api_routes())).await;

        let request = test::TestRequest::get().uri("/api/search?q=%20").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_direct_lookups() {
        let app = test::init_service(App::new().app_data(service()).service(api_routes())).await;

        let request = test::TestRequest::get()
            .uri("/api/robots/prefix/Speed")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["robots"][0]["number"], 7);

        let request = test::TestRequest::get()
            .uri("/api/robots/number/9")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = test::TestRequest::get().uri("/api/robots/random").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["robots"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_failed_reload_reports_error() {
        let data = service();
        let app = test::init_service(App::new().app_data(data.clone()).service(api_routes())).await;

        let request = test::TestRequest::post()
            .uri("/api/catalog/reload")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(data.catalog_size(), 2);
    }

    #[actix_web::test]
    async fn test_health_reports_catalog_size() {
        let app = test::init_service(App::new().app_data(service()).service(api_routes())).await;

        let request = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["robots"], 2);
    }
}
