pub mod catalog;
pub mod health;
pub mod robots;
pub mod search;

pub use catalog::reload_catalog;
pub use health::health_check;
pub use robots::robots_config;
pub use search::search_config;
