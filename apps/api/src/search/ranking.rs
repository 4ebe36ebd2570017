//! Fallback ranking: scores every robot with some tag or partial-name evidence
//! for the query, then keeps the robots scoring close to the best one.

use crate::catalog::RobotIndex;
use crate::config::SearchConfig;
use crate::error::{ApiError, Result};
use crate::models::robot::{has_bot_suffix, strip_bot_suffix};
use crate::models::Robot;
use crate::search::pos::{PosTag, PosTagger};
use crate::search::resolvers::{lookup_partial_name, UniqueRobots};
use crate::search::stem::TokenStemmer;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// A query token annotated for ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub stem: String,
    pub tag: PosTag,
}

/// Accumulated scores, remembering the order in which robots were first scored
#[derive(Debug, Default)]
pub struct ScoreBoard {
    entries: Vec<(Arc<Robot>, f32)>,
    positions: HashMap<i64, usize>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, robot: &Arc<Robot>, score: f32) {
        match self.positions.get(&robot.number) {
            Some(&position) => self.entries[position].1 += score,
            None => {
                self.positions.insert(robot.number, self.entries.len());
                self.entries.push((robot.clone(), score));
            }
        }
    }

    pub fn score_of(&self, number: i64) -> Option<f32> {
        self.positions
            .get(&number)
            .map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every robot within `max_delta` of the best score, best first.
    /// Equal scores keep the order in which they were first scored.
    pub fn select_top(mut self, max_delta: f32) -> Vec<Arc<Robot>> {
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        let highest = self.entries.first().map(|(_, score)| *score).unwrap_or(0.0);

        self.entries
            .into_iter()
            .take_while(|(_, score)| highest - score <= max_delta)
            .map(|(robot, _)| robot)
            .collect()
    }
}

/// Remove the first occurrence of each phrase, in configured order. Later repeats stay.
pub fn strip_filler_phrases(mut tokens: Vec<Token>, phrases: &[Vec<String>]) -> Vec<Token> {
    for phrase in phrases {
        if phrase.is_empty() || phrase.len() > tokens.len() {
            continue;
        }

        let start = tokens.windows(phrase.len()).position(|window| {
            window
                .iter()
                .zip(phrase)
                .all(|(token, word)| token.text == *word)
        });

        if let Some(start) = start {
            tokens.drain(start..start + phrase.len());
        }
    }
    tokens
}

/// Part-of-speech weighted tag and partial-name ranking
pub struct TagRanker {
    config: Arc<SearchConfig>,
    tagger: Box<dyn PosTagger>,
    stemmer: Box<dyn TokenStemmer>,
}

impl TagRanker {
    pub fn new(
        config: Arc<SearchConfig>,
        tagger: Box<dyn PosTagger>,
        stemmer: Box<dyn TokenStemmer>,
    ) -> Self {
        Self {
            config,
            tagger,
            stemmer,
        }
    }

    /// Rank the catalog against the query tokens
    pub fn rank(&self, index: &dyn RobotIndex, tokens: &[String]) -> Result<Vec<Arc<Robot>>> {
        let scores = self.score(index, tokens)?;
        debug!("Ranking scored {} candidate robots", scores.len());
        Ok(scores.select_top(self.config.max_score_delta))
    }

    /// Sum every kind of evidence into one score per robot
    pub fn score(&self, index: &dyn RobotIndex, tokens: &[String]) -> Result<ScoreBoard> {
        let annotated = self.annotate(tokens)?;
        let without_filler = strip_filler_phrases(annotated.clone(), &self.config.filler_phrases);

        let mut scores = ScoreBoard::new();
        self.score_names(index, &annotated, &mut scores)?;
        self.score_compound_names(index, tokens, &mut scores)?;
        self.score_tags(index, &without_filler, &mut scores)?;

        Ok(scores)
    }

    /// Tag, add a `BOT` pseudo-token for every "...bot(s)" word, and stem
    pub fn annotate(&self, tokens: &[String]) -> Result<Vec<Token>> {
        let tagged = self.tagger.tag(tokens)?;
        if tagged.len() != tokens.len() {
            return Err(ApiError::TaggingError(format!(
                "tagger returned {} tags for {} tokens",
                tagged.len(),
                tokens.len()
            )));
        }

        let pseudo: Vec<Token> = tagged
            .iter()
            .filter(|(text, _)| has_bot_suffix(text))
            .map(|(text, _)| strip_bot_suffix(text))
            .filter(|stripped| !stripped.is_empty())
            .map(|stripped| Token {
                text: stripped.to_string(),
                stem: stripped.to_string(),
                tag: PosTag::Bot,
            })
            .collect();

        let mut annotated: Vec<Token> = tagged
            .into_iter()
            .map(|(text, tag)| Token {
                stem: self.stemmer.stem(&text),
                text,
                tag,
            })
            .collect();
        annotated.extend(pseudo);

        Ok(annotated)
    }

    fn weight(&self, tag: PosTag) -> f32 {
        self.config.category_weights.weight(tag)
    }

    /// Each token that is (roughly) a robot's name prefix counts double its category weight
    pub fn score_names(
        &self,
        index: &dyn RobotIndex,
        annotated: &[Token],
        scores: &mut ScoreBoard,
    ) -> Result<()> {
        for token in annotated {
            let matches = lookup_partial_name(index, &token.text)?;
            if matches.is_empty() {
                continue;
            }

            let score = self.weight(token.tag) * self.config.name_weight_multiplier;
            for robot in &matches {
                scores.add(robot, score);
            }
        }
        Ok(())
    }

    /// Runs of adjacent words that spell a name prefix ("party time") score a flat amount
    pub fn score_compound_names(
        &self,
        index: &dyn RobotIndex,
        tokens: &[String],
        scores: &mut ScoreBoard,
    ) -> Result<()> {
        for &size in &self.config.compound_window_sizes {
            if size > tokens.len() {
                continue;
            }

            let mut matches = UniqueRobots::new();
            for window in tokens.windows(size) {
                matches.extend(lookup_partial_name(index, &window.concat())?);
            }

            for robot in &matches.into_vec() {
                scores.add(robot, self.config.compound_name_score);
            }
        }
        Ok(())
    }

    /// Tag overlap on the filler-stripped tokens; a stem-only match counts for less
    pub fn score_tags(
        &self,
        index: &dyn RobotIndex,
        tokens: &[Token],
        scores: &mut ScoreBoard,
    ) -> Result<()> {
        let allowed = tokens
            .iter()
            .filter(|t| t.tag == PosTag::Bot || !self.config.blacklist.contains(&t.text));

        for token in allowed {
            let full_matches = index.by_tag(&token.text)?;
            let full_numbers: HashSet<i64> = full_matches.iter().map(|r| r.number).collect();

            let stem_matches: Vec<Arc<Robot>> = if token.stem == token.text {
                Vec::new()
            } else {
                index
                    .by_tag(&token.stem)?
                    .into_iter()
                    .filter(|r| !full_numbers.contains(&r.number))
                    .collect()
            };

            if full_matches.is_empty() && stem_matches.is_empty() {
                continue;
            }

            let full_score = self.weight(token.tag);
            let stem_score = full_score * self.config.stem_weight_factor;

            for robot in &full_matches {
                scores.add(robot, full_score);
            }
            for robot in &stem_matches {
                scores.add(robot, stem_score);
            }
        }
        Ok(())
    }
}
