//! Cleaning of a single drug-name string.
//!
//! Cleaning runs in a fixed order, and the order matters:
//!
//! 1. lower-case
//! 2. drop bracketed annotations such as ` [obsolete]` or ` (as sulfate)`
//! 3. delete punctuation without inserting a space
//! 4. strip dosage units, time words and route words, as the [`CleanProfile`] asks
//! 5. post-split cleanup: the word `in`, stray slashes, bare numbers, spacing
//!
//! Splitting on the compound-name delimiter happens between steps 3 and 4,
//! so callers that split use [`NameCleaner::first_clean`] and
//! [`NameCleaner::finish`] separately.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::NormalizeOptions;

static BRACKET_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s\[[a-zA-Z0-9_/ -]+\]").expect("bracket annotation pattern is valid")
});

static PAREN_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s\([a-zA-Z0-9_/ -]+\)").expect("paren annotation pattern is valid")
});

/// Characters deleted outright. Hyphen and slash are kept.
pub const PUNCTUATION: &[char] = &[
    '+', '*', '#', '!', '?', ';', '>', '<', '^', '@', '|', '.', '=', '&', '%', '(', ')', '$', '~',
    '_', '§', '\\', ':', '…', '"', '[', ']', '´', '`', ',', '\'', '\u{2018}', '\u{2019}',
    '\u{201C}', '\u{201D}', '¨', '{', '}',
];

/// Which word lists to strip from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanProfile {
    pub units: bool,
    pub time_words: bool,
    pub routes: bool,
}

impl CleanProfile {
    /// Canonical key: everything stripped.
    pub const CANONICAL: Self = Self {
        units: true,
        time_words: true,
        routes: true,
    };
    /// Canonical name with its administration method kept.
    pub const WITH_ROUTE: Self = Self {
        units: true,
        time_words: true,
        routes: false,
    };
    /// Further names split off the primary generic name.
    pub const EXTRA: Self = Self::WITH_ROUTE;
    /// Non-primary generic forms.
    pub const OTHER_GENERIC: Self = Self {
        units: true,
        time_words: false,
        routes: false,
    };
    /// Brand-name forms.
    pub const BRAND: Self = Self {
        units: true,
        time_words: false,
        routes: true,
    };
}

/// Applies the cleaning steps with a fixed set of word lists.
#[derive(Debug, Clone)]
pub struct NameCleaner {
    units: Vec<String>,
    time_words: Vec<String>,
    routes: Vec<String>,
}

impl NameCleaner {
    pub fn new(options: &NormalizeOptions) -> Self {
        Self {
            units: options.dosage_units.iter().map(|unit| unit.to_lowercase()).collect(),
            time_words: options
                .time_words
                .iter()
                .map(|word| format!(" {} ", word.trim().to_lowercase()))
                .collect(),
            routes: options
                .route_words
                .iter()
                .map(|word| format!(" {}", word.trim().to_lowercase()))
                .collect(),
        }
    }

    /// Full cleaning of a name that is not split.
    pub fn clean(&self, text: &str, profile: CleanProfile) -> String {
        self.finish(&first_clean(text), profile)
    }

    /// Steps 1-3: lower-case, annotations, punctuation.
    pub fn first_clean(&self, text: &str) -> String {
        first_clean(text)
    }

    /// Steps 4-5 on an already split fragment.
    pub fn finish(&self, fragment: &str, profile: CleanProfile) -> String {
        post_split_clean(&self.strip_words(fragment, profile))
    }

    /// Step 4 alone.
    pub fn strip_words(&self, text: &str, profile: CleanProfile) -> String {
        let mut out = text.to_string();
        if profile.units {
            for unit in &self.units {
                out = out.replace(unit.as_str(), "");
            }
        }
        if profile.time_words {
            for word in &self.time_words {
                out = out.replace(word.as_str(), " ");
            }
        }
        if profile.routes {
            for word in &self.routes {
                out = out.replace(word.as_str(), "");
            }
        }
        out
    }
}

/// Lower-case, drop bracketed annotations and delete punctuation.
pub fn first_clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_brackets = BRACKET_ANNOTATION.replace_all(&lowered, "");
    let without_annotations = PAREN_ANNOTATION.replace_all(&without_brackets, "");
    strip_punctuation(&without_annotations)
}

pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|ch| !PUNCTUATION.contains(ch)).collect()
}

/// Drop the word `in`, stray slashes and bare numbers; normalize spacing.
///
/// Numbers attached to a word (`b12`, `5-fluorouracil`) are kept.
pub fn post_split_clean(text: &str) -> String {
    let mut tokens = Vec::new();
    for raw in text.split_whitespace() {
        if raw == "in" {
            continue;
        }
        let token = raw.replace('/', "");
        if token.is_empty() || is_bare_number(&token) {
            continue;
        }
        tokens.push(token);
    }
    tokens.join(" ")
}

fn is_bare_number(token: &str) -> bool {
    token.chars().all(|ch| ch.is_ascii_digit())
}
