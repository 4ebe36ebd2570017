//! Part-of-speech tagging for query tokens.
//!
//! Categories use the Penn Treebank label set, plus a synthetic `BOT` category
//! for the name fragment left after stripping a "bot(s)" suffix.

use crate::error::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Part of speech category
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    CC,
    CD,
    DT,
    EX,
    FW,
    IN,
    JJ,
    JJR,
    JJS,
    LS,
    MD,
    NN,
    NNS,
    NNP,
    NNPS,
    PDT,
    POS,
    PRP,
    PRPS,
    RB,
    RBR,
    RBS,
    RP,
    SYM,
    TO,
    UH,
    VB,
    VBD,
    VBG,
    VBN,
    VBP,
    VBZ,
    WDT,
    WP,
    WPS,
    WRB,
    /// Name fragment synthesized from a "...bot" token
    Bot,
}

impl PosTag {
    const ALL: [PosTag; 37] = [
        PosTag::CC,
        PosTag::CD,
        PosTag::DT,
        PosTag::EX,
        PosTag::FW,
        PosTag::IN,
        PosTag::JJ,
        PosTag::JJR,
        PosTag::JJS,
        PosTag::LS,
        PosTag::MD,
        PosTag::NN,
        PosTag::NNS,
        PosTag::NNP,
        PosTag::NNPS,
        PosTag::PDT,
        PosTag::POS,
        PosTag::PRP,
        PosTag::PRPS,
        PosTag::RB,
        PosTag::RBR,
        PosTag::RBS,
        PosTag::RP,
        PosTag::SYM,
        PosTag::TO,
        PosTag::UH,
        PosTag::VB,
        PosTag::VBD,
        PosTag::VBG,
        PosTag::VBN,
        PosTag::VBP,
        PosTag::VBZ,
        PosTag::WDT,
        PosTag::WP,
        PosTag::WPS,
        PosTag::WRB,
        PosTag::Bot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::CC => "CC",
            PosTag::CD => "CD",
            PosTag::DT => "DT",
            PosTag::EX => "EX",
            PosTag::FW => "FW",
            PosTag::IN => "IN",
            PosTag::JJ => "JJ",
            PosTag::JJR => "JJR",
            PosTag::JJS => "JJS",
            PosTag::LS => "LS",
            PosTag::MD => "MD",
            PosTag::NN => "NN",
            PosTag::NNS => "NNS",
            PosTag::NNP => "NNP",
            PosTag::NNPS => "NNPS",
            PosTag::PDT => "PDT",
            PosTag::POS => "POS",
            PosTag::PRP => "PRP",
            PosTag::PRPS => "PRP$",
            PosTag::RB => "RB",
            PosTag::RBR => "RBR",
            PosTag::RBS => "RBS",
            PosTag::RP => "RP",
            PosTag::SYM => "SYM",
            PosTag::TO => "TO",
            PosTag::UH => "UH",
            PosTag::VB => "VB",
            PosTag::VBD => "VBD",
            PosTag::VBG => "VBG",
            PosTag::VBN => "VBN",
            PosTag::VBP => "VBP",
            PosTag::VBZ => "VBZ",
            PosTag::WDT => "WDT",
            PosTag::WP => "WP",
            PosTag::WPS => "WP$",
            PosTag::WRB => "WRB",
            PosTag::Bot => "BOT",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosTag(pub String);

impl FromStr for PosTag {
    type Err = UnknownPosTag;

    /// Labels are matched case-insensitively
    fn from_str(label: &str) -> std::result::Result<Self, Self::Err> {
        PosTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| UnknownPosTag(label.to_string()))
    }
}

/// Assigns a part of speech to each token of a query
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, PosTag)>>;
}

fn add(lexicon: &mut HashMap<&'static str, PosTag>, tag: PosTag, words: &[&'static str]) {
    for word in words {
        lexicon.insert(*word, tag);
    }
}

static LEXICON: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(|| {
    let mut lexicon = HashMap::new();

    add(
        &mut lexicon,
        PosTag::DT,
        &[
            "a", "an", "the", "this", "that", "these", "those", "any", "some", "every", "each",
            "another", "no",
        ],
    );
    add(&mut lexicon, PosTag::PDT, &["all", "both", "half"]);
    add(
        &mut lexicon,
        PosTag::IN,
        &[
            "about", "above", "after", "against", "among", "around", "at", "before", "behind",
            "below", "beside", "between", "by", "during", "for", "from", "if", "in", "inside",
            "into", "near", "of", "off", "on", "onto", "over", "since", "than", "through",
            "under", "until", "upon", "with", "within", "without", "because", "while",
        ],
    );
    add(&mut lexicon, PosTag::CC, &["and", "or", "but", "nor", "yet", "plus"]);
    add(&mut lexicon, PosTag::TO, &["to"]);
    add(&mut lexicon, PosTag::EX, &["there"]);
    add(
        &mut lexicon,
        PosTag::PRP,
        &[
            "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
            "yourself", "itself", "one",
        ],
    );
    add(&mut lexicon, PosTag::PRPS, &["my", "your", "his", "her", "its", "our", "their"]);
    add(
        &mut lexicon,
        PosTag::MD,
        &["can", "could", "may", "might", "must", "shall", "should", "will", "would"],
    );
    add(&mut lexicon, PosTag::WDT, &["which", "whatever"]);
    add(&mut lexicon, PosTag::WP, &["what", "who", "whom"]);
    add(&mut lexicon, PosTag::WPS, &["whose"]);
    add(&mut lexicon, PosTag::WRB, &["how", "when", "where", "why"]);
    add(
        &mut lexicon,
        PosTag::UH,
        &["hi", "hello", "hey", "please", "oh", "wow", "yes", "lol", "ok", "okay"],
    );
    add(
        &mut lexicon,
        PosTag::RB,
        &[
            "not", "very", "really", "too", "also", "just", "again", "here", "now", "never",
            "always", "so", "quite", "maybe",
        ],
    );
    add(&mut lexicon, PosTag::RBR, &["more", "less"]);
    add(&mut lexicon, PosTag::RBS, &["most", "least"]);
    add(&mut lexicon, PosTag::VBZ, &["is", "has", "does", "looks"]);
    add(&mut lexicon, PosTag::VBP, &["are", "am", "have", "do"]);
    add(&mut lexicon, PosTag::VBD, &["was", "were", "had", "did", "made", "saw", "found"]);
    add(&mut lexicon, PosTag::VBN, &["been", "seen", "done", "gone"]);
    add(
        &mut lexicon,
        PosTag::VB,
        &[
            "be", "show", "find", "see", "give", "get", "want", "need", "like", "make", "send",
            "tell", "look", "fly", "swim", "dance", "sing", "cook", "build",
        ],
    );
    add(
        &mut lexicon,
        PosTag::JJ,
        &[
            "big", "small", "tiny", "little", "large", "huge", "giant", "smol", "tall", "short",
            "long", "round", "square", "flat", "fast", "slow", "quick", "old", "new", "young",
            "good", "bad", "happy", "sad", "angry", "cute", "sleepy", "hungry", "shy", "brave",
            "red", "orange", "yellow", "green", "blue", "purple", "pink", "brown", "black",
            "white", "grey", "gray", "gold", "silver", "hot", "cold", "warm", "cool", "wet",
            "dry", "soft", "hard", "loud", "quiet", "spooky", "fluffy", "shiny", "funny", "sweet",
        ],
    );
    add(
        &mut lexicon,
        PosTag::JJR,
        &["bigger", "smaller", "better", "worse", "faster", "slower", "larger"],
    );
    add(
        &mut lexicon,
        PosTag::JJS,
        &["biggest", "smallest", "best", "worst", "fastest", "slowest", "largest"],
    );

    lexicon
});

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ic", "ary", "ient", "ant",
];

/// Lexicon and suffix based tagger for short queries.
///
/// Closed-class words come from a fixed lexicon; open-class words are guessed
/// from their endings, with a light look-back so that a word following a modal
/// or "to" reads as a base verb.
#[derive(Debug, Clone, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }

    fn classify(&self, word: &str, previous: Option<PosTag>) -> PosTag {
        if let Some(tag) = LEXICON.get(word) {
            return *tag;
        }

        let digits = word.strip_prefix('-').unwrap_or(word);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::CD;
        }

        if !word.chars().any(char::is_alphabetic) {
            return PosTag::SYM;
        }

        if word.ends_with("'s") {
            return PosTag::POS;
        }

        // Base verb after a modal or infinitive marker ("can fly", "to cook")
        if matches!(previous, Some(PosTag::MD) | Some(PosTag::TO)) && !word.ends_with('s') {
            return PosTag::VB;
        }

        let len = word.chars().count();

        if len > 4 && word.ends_with("ing") {
            return PosTag::VBG;
        }

        if len > 3 && word.ends_with("ed") {
            return PosTag::VBD;
        }

        if len > 3 && word.ends_with("ly") {
            return PosTag::RB;
        }

        if len > 4 && word.ends_with("est") {
            return PosTag::JJS;
        }

        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
            return PosTag::JJ;
        }

        if len > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return PosTag::NNS;
        }

        PosTag::NN
    }
}

impl PosTagger for HeuristicTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, PosTag)>> {
        let mut tagged = Vec::with_capacity(tokens.len());
        let mut previous = None;

        for token in tokens {
            let tag = self.classify(token, previous);
            previous = Some(tag);
            tagged.push((token.clone(), tag));
        }

        Ok(tagged)
    }
}
