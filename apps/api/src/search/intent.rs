use crate::config::SearchConfig;

/// Fixed keyword intents checked after the exact resolvers come up empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordIntent {
    Random,
    ThanksFr,
    Thanks,
}

/// Whether `phrase` occurs as a consecutive run of tokens anywhere in `tokens`
pub fn contains_sequence(tokens: &[String], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens.windows(phrase.len()).any(|window| window == phrase)
}

/// Whether any token contains any of the keywords as a substring
pub fn contains_keyword<S: AsRef<str>>(tokens: &[String], keywords: &[S]) -> bool {
    keywords
        .iter()
        .any(|keyword| tokens.iter().any(|token| token.contains(keyword.as_ref())))
}

/// Detect the random / gratitude intents, in that priority order
pub fn detect_keyword_intent(tokens: &[String], config: &SearchConfig) -> Option<KeywordIntent> {
    if contains_keyword(tokens, &config.random_keywords) {
        return Some(KeywordIntent::Random);
    }

    if tokens.iter().any(|t| config.thanks_fr_keywords.contains(t)) {
        return Some(KeywordIntent::ThanksFr);
    }

    if tokens.iter().any(|t| config.thanks_keywords.contains(t)) {
        return Some(KeywordIntent::Thanks);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_search_config;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_contains_sequence() {
        let phrase = tokens("state of bang");
        assert!(contains_sequence(&tokens("lol state of bang right now"), &phrase));
        assert!(contains_sequence(&tokens("state of bang"), &phrase));
        assert!(!contains_sequence(&tokens("state of the bang"), &phrase));
        assert!(!contains_sequence(&tokens("of bang"), &phrase));
    }

    #[test]
    fn test_keyword_priority() {
        let config = test_search_config();

        assert_eq!(
            detect_keyword_intent(&tokens("a randombot please"), &config),
            Some(KeywordIntent::Random)
        );
        assert_eq!(
            detect_keyword_intent(&tokens("merci thanks"), &config),
            Some(KeywordIntent::ThanksFr)
        );
        assert_eq!(
            detect_keyword_intent(&tokens("ty"), &config),
            Some(KeywordIntent::Thanks)
        );
        // Gratitude words must match exactly
        assert_eq!(detect_keyword_intent(&tokens("thankful tyre"), &config), None);
    }
}
