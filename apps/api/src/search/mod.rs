//! Query resolution pipeline.
//!
//! Stages run in a fixed order and the first one that produces an answer wins:
//! special phrase, robot name, robot number, random pick, gratitude (French,
//! then English), and finally tag ranking.

pub mod intent;
pub mod pos;
pub mod ranking;
pub mod resolvers;
pub mod stem;
pub mod tokenizer;

use crate::catalog::RobotIndex;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::QueryResult;
use intent::{contains_sequence, detect_keyword_intent, KeywordIntent};
use pos::{HeuristicTagger, PosTagger};
use ranking::TagRanker;
use resolvers::{resolve_by_name, resolve_by_number};
use stem::{PorterStemmer, TokenStemmer};
use std::sync::Arc;
use tokenizer::tokenize;
use tracing::debug;

pub struct QueryResolver {
    config: Arc<SearchConfig>,
    ranker: TagRanker,
}

impl QueryResolver {
    /// Resolver using the built-in tagger and stemmer
    pub fn new(config: SearchConfig) -> Self {
        Self::with_services(
            config,
            Box::new(HeuristicTagger::new()),
            Box::new(PorterStemmer::new()),
        )
    }

    pub fn with_services(
        config: SearchConfig,
        tagger: Box<dyn PosTagger>,
        stemmer: Box<dyn TokenStemmer>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            ranker: TagRanker::new(config.clone(), tagger, stemmer),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolve one query against a single catalog snapshot
    pub fn resolve(&self, index: &dyn RobotIndex, query: &str) -> Result<QueryResult> {
        let mut tokens = tokenize(query);
        if tokens.len() > self.config.max_tokens {
            debug!(
                "Truncating query from {} to {} tokens",
                tokens.len(),
                self.config.max_tokens
            );
            tokens.truncate(self.config.max_tokens);
        }

        if contains_sequence(&tokens, &self.config.easter_egg_phrase) {
            debug!("Matched easter egg phrase");
            return Ok(QueryResult::EasterEgg);
        }

        let by_name = resolve_by_name(index, &tokens)?;
        if !by_name.is_empty() {
            debug!("Resolved {} robots by name", by_name.len());
            return Ok(QueryResult::Search(by_name));
        }

        let by_number = resolve_by_number(index, &tokens)?;
        if !by_number.is_empty() {
            debug!("Resolved {} robots by number", by_number.len());
            return Ok(QueryResult::Search(by_number));
        }

        match detect_keyword_intent(&tokens, &self.config) {
            Some(KeywordIntent::Random) => {
                return Ok(match index.random()? {
                    Some(robot) => QueryResult::Random(robot),
                    None => QueryResult::Empty,
                });
            }
            Some(KeywordIntent::ThanksFr) => return Ok(QueryResult::WelcomeFr),
            Some(KeywordIntent::Thanks) => return Ok(QueryResult::Welcome),
            None => {}
        }

        let ranked = self.ranker.rank(index, &tokens)?;
        Ok(QueryResult::search(ranked))
    }
}
