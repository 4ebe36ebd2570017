use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Strips a trailing "bot" or "bots" from an already lowercased word.
pub fn strip_bot_suffix(word: &str) -> &str {
    word.strip_suffix("bots")
        .or_else(|| word.strip_suffix("bot"))
        .unwrap_or(word)
}

/// Whether the word ends in "bot" or "bots".
pub fn has_bot_suffix(word: &str) -> bool {
    word.ends_with("bot") || word.ends_with("bots")
}

/// Derives the lookup prefix for a robot name: lowercased, without the trailing "bot(s)".
pub fn name_prefix(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    strip_bot_suffix(&lowered).to_string()
}

/// A robot as it appears in the catalog file
#[derive(Debug, Clone, Deserialize)]
pub struct RobotRecord {
    pub number: i64,
    pub name: String,
    #[serde(alias = "tweet_id")]
    pub source_ref: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "image")]
    pub image_ref: String,
    #[serde(default, alias = "alt")]
    pub alt_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A catalogued robot. Immutable once built; the prefix is always derived from the name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Robot {
    pub number: i64,
    pub name: String,
    name_prefix: String,
    pub source_ref: u64,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub image_ref: String,
    pub alt_text: String,
    pub tags: BTreeSet<String>,
}

impl Robot {
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }
}

impl From<RobotRecord> for Robot {
    fn from(record: RobotRecord) -> Self {
        let tags = record
            .tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        Self {
            number: record.number,
            name_prefix: name_prefix(&record.name),
            name: record.name,
            source_ref: record.source_ref,
            timestamp: record.timestamp,
            description: record.description,
            image_ref: record.image_ref,
            alt_text: record.alt_text,
            tags,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_robot(number: i64, name: &str, tags: &[&str]) -> Robot {
    Robot::from(RobotRecord {
        number,
        name: name.to_string(),
        source_ref: 1_000_000 + number as u64,
        timestamp: DateTime::<Utc>::from_timestamp(1_500_000_000 + number, 0).unwrap_or_default(),
        description: format!("{} is a small robot.", name),
        image_ref: format!("https://example.com/{}.png", number),
        alt_text: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prefix_strips_bot_suffix() {
        assert_eq!(name_prefix("Speedbot"), "speed");
        assert_eq!(name_prefix("Partybots"), "party");
        assert_eq!(name_prefix("Bot"), "");
        assert_eq!(name_prefix("Robotic Arm"), "robotic arm");
    }

    #[test]
    fn test_tags_are_normalized() {
        let robot = test_robot(3, "Tinybot", &["Small", "small ", "", "cute"]);
        let tags: Vec<&str> = robot.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["cute", "small"]);
        assert_eq!(robot.name_prefix(), "tiny");
    }
}
