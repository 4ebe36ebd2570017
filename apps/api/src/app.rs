use crate::{
    config::{Config, SearchConfig},
    error::Result,
    routes::api_routes,
    search::QueryResolver,
    services::RobotSearchService,
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::net::TcpListener;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Missing search data is fatal: nothing is defaulted
        let search_config = SearchConfig::load(&self.config.search_config_path)
            .context("Failed to load search configuration")?;
        let resolver = QueryResolver::new(search_config);

        let search_service = web::Data::new(
            RobotSearchService::load(resolver, self.config.catalog_path.clone())
                .context("Failed to load robot catalog")?,
        );
        info!(
            "Serving {} robots from {}",
            search_service.catalog_size(),
            self.config.catalog_path.display()
        );

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(search_service.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
