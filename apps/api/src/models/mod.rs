use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use robot::{Robot, RobotRecord};

pub mod robot;

/// The kind of answer a query resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Search,
    Random,
    Welcome,
    WelcomeFr,
    EasterEgg,
    Empty,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Search => "search",
            ResultKind::Random => "random",
            ResultKind::Welcome => "welcome",
            ResultKind::WelcomeFr => "welcome-fr",
            ResultKind::EasterEgg => "easter-egg",
            ResultKind::Empty => "empty",
        }
    }
}

/// Outcome of resolving a single query. Only the kinds that carry robots hold them.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Search(Vec<Arc<Robot>>),
    Random(Arc<Robot>),
    Welcome,
    WelcomeFr,
    EasterEgg,
    Empty,
}

impl QueryResult {
    /// Wraps a list of matches, collapsing an empty list into `Empty`
    pub fn search(robots: Vec<Arc<Robot>>) -> Self {
        if robots.is_empty() {
            QueryResult::Empty
        } else {
            QueryResult::Search(robots)
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            QueryResult::Search(_) => ResultKind::Search,
            QueryResult::Random(_) => ResultKind::Random,
            QueryResult::Welcome => ResultKind::Welcome,
            QueryResult::WelcomeFr => ResultKind::WelcomeFr,
            QueryResult::EasterEgg => ResultKind::EasterEgg,
            QueryResult::Empty => ResultKind::Empty,
        }
    }

    pub fn robots(&self) -> &[Arc<Robot>] {
        match self {
            QueryResult::Search(robots) => robots,
            QueryResult::Random(robot) => std::slice::from_ref(robot),
            _ => &[],
        }
    }
}

/// Request body for a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query, e.g. "show me speedbot"
    #[serde(alias = "q")]
    pub query: String,
}

/// Response body for a search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub kind: ResultKind,
    pub robots: Vec<Robot>,
}

impl From<&QueryResult> for SearchResponse {
    fn from(result: &QueryResult) -> Self {
        Self {
            kind: result.kind(),
            robots: result.robots().iter().map(|r| Robot::clone(r)).collect(),
        }
    }
}

/// Response body for direct robot lookups
#[derive(Debug, Clone, Serialize)]
pub struct RobotsResponse {
    pub robots: Vec<Robot>,
}

impl RobotsResponse {
    pub fn from_arcs(robots: &[Arc<Robot>]) -> Self {
        Self {
            robots: robots.iter().map(|r| Robot::clone(r)).collect(),
        }
    }
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub robots: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::robot::test_robot;

    #[test]
    fn test_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ResultKind::WelcomeFr).unwrap(),
            "\"welcome-fr\""
        );
        assert_eq!(
            serde_json::to_string(&ResultKind::EasterEgg).unwrap(),
            "\"easter-egg\""
        );
        assert_eq!(ResultKind::WelcomeFr.as_str(), "welcome-fr");
    }

    #[test]
    fn test_empty_search_collapses() {
        assert_eq!(QueryResult::search(Vec::new()), QueryResult::Empty);
        assert!(QueryResult::Welcome.robots().is_empty());
    }

    #[test]
    fn test_random_carries_one_robot() {
        let robot = Arc::new(test_robot(5, "Dicebot", &["dice"]));
        let result = QueryResult::Random(robot.clone());
        assert_eq!(result.kind(), ResultKind::Random);
        assert_eq!(result.robots(), &[robot]);

        let response = SearchResponse::from(&result);
        assert_eq!(response.robots.len(), 1);
        assert_eq!(response.robots[0].number, 5);
    }
}
