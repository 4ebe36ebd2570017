pub mod robot_search;

// Re-export public types
pub use robot_search::RobotSearchService;
