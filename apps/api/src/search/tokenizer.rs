use once_cell::sync::Lazy;
use regex::Regex;

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|[^a-zA-Z0-9\-.])#[A-Za-z_][A-Za-z0-9_]+").expect("valid hashtag regex")
});

static MENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|[^a-zA-Z0-9\-.])@[A-Za-z_][A-Za-z0-9_]+").expect("valid mention regex")
});

/// Split a raw query into normalized tokens. Order and duplicates are preserved.
pub fn tokenize(query: &str) -> Vec<String> {
    let cleaned = split_hyphens(query);
    let cleaned = HASHTAG_RE.replace_all(&cleaned, "$1");
    let cleaned = MENTION_RE.replace_all(&cleaned, "$1");

    cleaned
        .split_whitespace()
        .map(sanitize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Replace a hyphen with a space when it is followed by a non-digit or preceded by a
/// non-space character. A minus sign directly in front of a number survives.
fn split_hyphens(query: &str) -> String {
    let chars: Vec<char> = query.chars().collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c != '-' {
                return c;
            }
            let followed_by_non_digit = chars.get(i + 1).is_some_and(|next| !next.is_ascii_digit());
            let preceded_by_non_space = i > 0 && !chars[i - 1].is_whitespace();
            if followed_by_non_digit || preceded_by_non_space {
                ' '
            } else {
                c
            }
        })
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '\''
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase, unify apostrophes, drop stray punctuation and trim punctuation at either end
fn sanitize_token(token: &str) -> String {
    let lowered = token.to_lowercase().replace('\u{2019}', "'");
    let kept: String = lowered.chars().filter(|&c| is_token_char(c)).collect();
    kept.trim_matches(|c: char| !is_word_char(c)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenization() {
        assert_eq!(
            tokenize("Show me SPEEDBOT, please!"),
            vec!["show", "me", "speedbot", "please"]
        );
    }

    #[test]
    fn test_hyphenated_compounds_split() {
        assert_eq!(tokenize("a cake-baking bot"), vec!["a", "cake", "baking", "bot"]);
        assert_eq!(tokenize("robot -42"), vec!["robot", "42"]);
    }

    #[test]
    fn test_mentions_and_hashtags_removed() {
        assert_eq!(
            tokenize("@smolbotbot find #robots with hats"),
            vec!["find", "with", "hats"]
        );
        // Mid-word symbols are not treated as mentions
        assert_eq!(tokenize("me@example.com"), vec!["meexamplecom"]);
    }

    #[test]
    fn test_apostrophes_normalized() {
        assert_eq!(tokenize("What\u{2019}s that?"), vec!["what's", "that"]);
        assert_eq!(tokenize("'quoted'"), vec!["quoted"]);
    }

    #[test]
    fn test_empty_tokens_discarded() {
        assert!(tokenize("  ... !!! ").is_empty());
        assert_eq!(tokenize("42 42"), vec!["42", "42"]);
    }
}
