use rust_stemmers::{Algorithm, Stemmer};

/// Reduces a token to its stem, e.g. "dancing" -> "danc"
pub trait TokenStemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

/// English (Porter2) stemmer
pub struct PorterStemmer {
    inner: Stemmer,
}

impl PorterStemmer {
    pub fn new() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStemmer for PorterStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stems_common_suffixes() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("dancing"), "danc");
        assert_eq!(stemmer.stem("robots"), "robot");
        assert_eq!(stemmer.stem("cats"), "cat");
    }
}
