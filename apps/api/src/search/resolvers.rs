use crate::catalog::RobotIndex;
use crate::error::Result;
use crate::models::robot::strip_bot_suffix;
use crate::models::Robot;
use std::collections::HashSet;
use std::sync::Arc;

/// Robots in first-seen order, de-duplicated by number
#[derive(Debug, Default)]
pub struct UniqueRobots {
    robots: Vec<Arc<Robot>>,
    seen: HashSet<i64>,
}

impl UniqueRobots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = Arc<Robot>>>(&mut self, robots: I) {
        for robot in robots {
            if self.seen.insert(robot.number) {
                self.robots.push(robot);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    pub fn into_vec(self) -> Vec<Arc<Robot>> {
        self.robots
    }
}

fn lookup_keys(index: &dyn RobotIndex, keys: &[&str]) -> Result<Vec<Arc<Robot>>> {
    let mut found = UniqueRobots::new();
    for key in keys.iter().filter(|key| !key.is_empty()) {
        found.extend(index.by_name_prefix(key)?);
    }
    Ok(found.into_vec())
}

/// Look a name prefix up as given, with an "s" appended, and with one trailing "s" removed
pub fn lookup_name_variants(index: &dyn RobotIndex, key: &str) -> Result<Vec<Arc<Robot>>> {
    if key.is_empty() {
        return Ok(Vec::new());
    }
    let plural = format!("{}s", key);
    let singular = key.strip_suffix('s').unwrap_or(key);
    lookup_keys(index, &[key, plural.as_str(), singular])
}

/// Same variants as [`lookup_name_variants`], singular before plural. Ranking
/// uses this order, which decides first-scored order among tied robots.
pub fn lookup_partial_name(index: &dyn RobotIndex, key: &str) -> Result<Vec<Arc<Robot>>> {
    if key.is_empty() {
        return Ok(Vec::new());
    }
    let plural = format!("{}s", key);
    let singular = key.strip_suffix('s').unwrap_or(key);
    lookup_keys(index, &[key, singular, plural.as_str()])
}

/// Find robots named in the query, e.g. "speedbot" or "the party bot"
pub fn resolve_by_name(index: &dyn RobotIndex, tokens: &[String]) -> Result<Vec<Arc<Robot>>> {
    let mut found = UniqueRobots::new();

    for (position, token) in tokens.iter().enumerate() {
        if !token.contains("bot") {
            continue;
        }

        found.extend(lookup_name_variants(index, strip_bot_suffix(token))?);

        // A bare "bot" may follow a name written as separate words ("party time bot")
        if token == "bot" || token == "bots" {
            for start in 0..position {
                let compound = tokens[start..position].concat();
                found.extend(index.by_name_prefix(&compound)?);
            }
        }
    }

    Ok(found.into_vec())
}

/// Parse an optionally negative run of ASCII digits
pub fn parse_number(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Find robots whose number appears as a token
pub fn resolve_by_number(index: &dyn RobotIndex, tokens: &[String]) -> Result<Vec<Arc<Robot>>> {
    let mut found = UniqueRobots::new();
    for number in tokens.iter().filter_map(|token| parse_number(token)) {
        found.extend(index.by_number(number)?);
    }
    Ok(found.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crate::models::robot::test_robot;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::build(vec![
            test_robot(7, "Speedbot", &["fast"]),
            test_robot(12, "Partytimebot", &["party"]),
            test_robot(13, "Timebot", &["clock"]),
            test_robot(20, "Catsbot", &["cat"]),
            test_robot(42, "Tinybot", &["small"]),
        ])
        .unwrap()
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    fn numbers(robots: Vec<Arc<Robot>>) -> Vec<i64> {
        robots.iter().map(|r| r.number).collect()
    }

    #[test]
    fn test_name_suffix_stripping() {
        let index = catalog();
        let found = resolve_by_name(&index, &tokens("show me speedbot")).unwrap();
        assert_eq!(numbers(found), vec![7]);
    }

    #[test]
    fn test_plural_variants() {
        let index = catalog();
        assert_eq!(numbers(resolve_by_name(&index, &tokens("speedbots")).unwrap()), vec![7]);
        // "catbot" finds "cats" through the appended "s"
        assert_eq!(numbers(resolve_by_name(&index, &tokens("catbot")).unwrap()), vec![20]);
    }

    #[test]
    fn test_compound_name_before_bare_bot() {
        let index = catalog();
        let found = resolve_by_name(&index, &tokens("party time bot")).unwrap();
        assert_eq!(numbers(found), vec![12, 13]);
    }

    #[test]
    fn test_results_deduplicated() {
        let index = catalog();
        let found = resolve_by_name(&index, &tokens("speedbot speedbots")).unwrap();
        assert_eq!(numbers(found), vec![7]);
    }

    #[test]
    fn test_number_resolution() {
        let index = catalog();
        assert_eq!(numbers(resolve_by_number(&index, &tokens("robot 42")).unwrap()), vec![42]);
        assert_eq!(
            numbers(resolve_by_number(&index, &tokens("7 or 42 or 7")).unwrap()),
            vec![7, 42]
        );
        assert!(resolve_by_number(&index, &tokens("robot 9000")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("-3"), Some(-3));
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("4x2"), None);
        assert_eq!(parse_number("+4"), None);
        assert_eq!(parse_number("99999999999999999999999"), None);
    }

    #[test]
    fn test_variant_order() {
        let index = CatalogSnapshot::build(vec![
            test_robot(1, "Catbot", &[]),
            test_robot(2, "Catssbot", &[]),
        ])
        .unwrap();

        // Name resolution tries the plural first, ranking the singular
        assert_eq!(numbers(lookup_name_variants(&index, "cats").unwrap()), vec![2, 1]);
        assert_eq!(numbers(lookup_partial_name(&index, "cats").unwrap()), vec![1, 2]);
        assert!(lookup_partial_name(&index, "").unwrap().is_empty());
    }
}
