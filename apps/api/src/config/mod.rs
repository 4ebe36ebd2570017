use crate::error::{ApiError, Result};
use crate::search::pos::PosTag;
use ::config::{Environment, File, FileFormat};
use dotenv::dotenv;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Server settings, read from the environment (`SMOLBOTBOT_*`) and an optional `config/default.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    pub search_config_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let settings = ::config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("catalog_path", "data/robots.json")?
            .set_default("search_config_path", "data/search.toml")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("SMOLBOTBOT").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Weight given to each part-of-speech category during ranking
#[derive(Debug, Clone)]
pub struct CategoryWeights {
    weights: HashMap<PosTag, f32>,
    default: f32,
}

impl CategoryWeights {
    pub fn new(weights: HashMap<PosTag, f32>, default: f32) -> Self {
        Self { weights, default }
    }

    pub fn weight(&self, tag: PosTag) -> f32 {
        self.weights.get(&tag).copied().unwrap_or(self.default)
    }
}

/// Raw contents of the search settings file
#[derive(Debug, Clone, Deserialize)]
struct SearchSettings {
    random_keywords: Vec<String>,
    thanks_keywords: Vec<String>,
    thanks_fr_keywords: Vec<String>,
    easter_egg_phrase: String,
    category_weights: HashMap<String, f32>,
    default_weight: f32,
    name_weight_multiplier: f32,
    compound_name_score: f32,
    compound_window_sizes: Vec<usize>,
    stem_weight_factor: f32,
    max_score_delta: f32,
    max_tokens: usize,
    blacklist_path: PathBuf,
    filler_phrases_path: PathBuf,
}

/// Everything the query resolver needs at startup. Built once; never defaulted.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub random_keywords: Vec<String>,
    pub thanks_keywords: HashSet<String>,
    pub thanks_fr_keywords: HashSet<String>,
    pub easter_egg_phrase: Vec<String>,
    pub category_weights: CategoryWeights,
    pub name_weight_multiplier: f32,
    pub compound_name_score: f32,
    pub compound_window_sizes: Vec<usize>,
    pub stem_weight_factor: f32,
    pub max_score_delta: f32,
    pub max_tokens: usize,
    pub blacklist: HashSet<String>,
    pub filler_phrases: Vec<Vec<String>>,
}

impl SearchConfig {
    /// Load the settings file plus the blacklist and filler-phrase files it points at.
    /// Relative data paths are resolved against the settings file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let settings_text = read_required(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let settings = parse_settings(&settings_text)?;
        let blacklist_text = read_required(&base.join(&settings.blacklist_path))?;
        let filler_text = read_required(&base.join(&settings.filler_phrases_path))?;

        let config = Self::from_settings(settings, &blacklist_text, &filler_text)?;

        info!(
            "Loaded search config: {} blacklisted words, {} filler phrases",
            config.blacklist.len(),
            config.filler_phrases.len()
        );

        Ok(config)
    }

    /// Build from already-read file contents
    pub fn parse(settings: &str, blacklist: &str, filler_phrases: &str) -> Result<Self> {
        Self::from_settings(parse_settings(settings)?, blacklist, filler_phrases)
    }

    fn from_settings(settings: SearchSettings, blacklist: &str, filler_phrases: &str) -> Result<Self> {
        if settings.max_tokens == 0 {
            return Err(ApiError::ConfigError("max_tokens must be positive".to_string()));
        }

        if settings.compound_window_sizes.iter().any(|&size| size < 2) {
            return Err(ApiError::ConfigError(
                "compound_window_sizes must all be at least 2".to_string(),
            ));
        }

        let mut weights = HashMap::with_capacity(settings.category_weights.len());
        for (label, weight) in settings.category_weights {
            let tag: PosTag = label
                .parse()
                .map_err(|_| ApiError::ConfigError(format!("Unknown category label: {}", label)))?;
            weights.insert(tag, weight);
        }

        let easter_egg_phrase = split_phrase(&settings.easter_egg_phrase);
        if easter_egg_phrase.is_empty() {
            return Err(ApiError::ConfigError("easter_egg_phrase is empty".to_string()));
        }

        Ok(Self {
            random_keywords: normalize_keywords(settings.random_keywords).collect(),
            thanks_keywords: normalize_keywords(settings.thanks_keywords).collect(),
            thanks_fr_keywords: normalize_keywords(settings.thanks_fr_keywords).collect(),
            easter_egg_phrase,
            category_weights: CategoryWeights::new(weights, settings.default_weight),
            name_weight_multiplier: settings.name_weight_multiplier,
            compound_name_score: settings.compound_name_score,
            compound_window_sizes: settings.compound_window_sizes,
            stem_weight_factor: settings.stem_weight_factor,
            max_score_delta: settings.max_score_delta,
            max_tokens: settings.max_tokens,
            blacklist: blacklist
                .lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|line| !line.is_empty())
                .collect(),
            filler_phrases: filler_phrases
                .lines()
                .map(split_phrase)
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        })
    }
}

fn parse_settings(text: &str) -> Result<SearchSettings> {
    let settings = ::config::Config::builder()
        .add_source(File::from_str(text, FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn read_required(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ApiError::ConfigError(format!("Failed to read {}: {}", path.display(), e)))
}

fn split_phrase(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_lowercase).collect()
}

fn normalize_keywords(keywords: Vec<String>) -> impl Iterator<Item = String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
}

#[cfg(test)]
pub(crate) fn test_search_config() -> SearchConfig {
    SearchConfig::parse(
        include_str!("../../data/search.toml"),
        include_str!("../../data/request-blacklist.txt"),
        include_str!("../../data/filler-phrases.txt"),
    )
    .expect("bundled search config should parse")
}
