pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;

pub use config::{Config, SearchConfig};
pub use error::{ApiError, Result};
