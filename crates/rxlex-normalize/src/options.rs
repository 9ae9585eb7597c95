//! Normalization options and the default word lists.
//!
//! Word lists are stored as bare words; the cleaner decides how each list
//! is matched:
//!
//! - dosage units: plain substring, deleted
//! - time words: surrounded by spaces, replaced with one space
//! - route words: preceded by a space, deleted

use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// Delimiter between the names of a multi-ingredient drug.
pub const DEFAULT_DELIMITER: &str = " / ";

/// Dosage units, in match order. Compound units come before their parts.
pub const DEFAULT_DOSAGE_UNITS: &[&str] = &[
    "mg/ml",
    "mg/mg",
    "mci/ml",
    "ml",
    "mg",
    "gm",
    "gbq",
    "mcg/actuat",
    "actuat",
    "mci",
    "mw",
    "sq-hdm",
    "meq/ml",
    "meq",
    "mcg",
];

pub const DEFAULT_TIME_WORDS: &[&str] = &[
    "per", "hour", "-hr", "hr", "-day", "day", "-week", "week", "-month", "month",
];

/// Administration-route and dose-form words, in match order.
///
/// Matching is by prefix, so longer forms (`tablets`) precede the words
/// they contain (`table`).
pub const DEFAULT_ROUTE_WORDS: &[&str] = &[
    "oral",
    "solution",
    "suspension",
    "injection",
    "tablets",
    "tablet",
    "table",
    "extract",
    "whole",
    "product",
    "release",
    "topical",
    "ointment",
    "prefilled",
    "syringe",
    "chewable",
    "extended",
    "oil",
    "spray",
    "gel",
    "taper",
    "medicated",
    "patch",
    "pack",
    "cream",
    "dose",
    "metered",
    "pill",
    "shampoo",
    "rinse",
    "ingredients",
    "inhaler",
    "sublingual",
    "capsules",
    "capsule",
    "soap",
    "liquid",
    "powder",
    "lotion",
    "mask",
    "masque",
];

/// Options for building a lexicon from resolved records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Delimiter splitting a compound name into several names.
    pub delimiter: String,
    pub dosage_units: Vec<String>,
    pub time_words: Vec<String>,
    pub route_words: Vec<String>,
    /// Also drop alternatives equal to another entry's canonical name.
    pub drop_foreign_canonicals: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            dosage_units: to_owned(DEFAULT_DOSAGE_UNITS),
            time_words: to_owned(DEFAULT_TIME_WORDS),
            route_words: to_owned(DEFAULT_ROUTE_WORDS),
            drop_foreign_canonicals: true,
        }
    }
}

impl NormalizeOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_foreign_canonicals_dropped(mut self, enable: bool) -> Self {
        self.drop_foreign_canonicals = enable;
        self
    }

    /// Reject options the cleaner cannot apply.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(NormalizeError::InvalidOptions(
                "delimiter must not be empty".to_string(),
            ));
        }
        for (list, words) in [
            ("dosage_units", &self.dosage_units),
            ("time_words", &self.time_words),
            ("route_words", &self.route_words),
        ] {
            if let Some(position) = words.iter().position(|word| word.trim().is_empty()) {
                return Err(NormalizeError::InvalidOptions(format!(
                    "{list}[{position}] is blank"
                )));
            }
        }
        Ok(())
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}
