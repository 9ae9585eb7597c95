use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::ids::RecordIndex;
use crate::record::AuditRow;

/// Mapping from canonical drug name to the alternative names that normalize to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    entries: BTreeMap<String, BTreeSet<String>>,
}

/// A breach of the lexicon invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LexiconViolation {
    /// An alternative equal to its own canonical key.
    SelfReference { canonical: String },
    /// An alternative listed under more than one canonical key.
    SharedAlternative {
        alternative: String,
        canonicals: Vec<String>,
    },
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry. Returns `false` if the key was already present.
    pub fn insert_entry<I>(&mut self, canonical: String, alternatives: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        if self.entries.contains_key(&canonical) {
            return false;
        }
        self.entries
            .insert(canonical, alternatives.into_iter().collect());
        true
    }

    pub fn get(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(canonical)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut BTreeSet<String>)> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of alternative names across all entries.
    pub fn alternative_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Find the canonical key an alternative normalizes to, if any.
    pub fn canonical_for(&self, alternative: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, alternatives)| alternatives.contains(alternative))
            .map(|(canonical, _)| canonical.as_str())
    }

    /// Check the self-reference and disjointness invariants.
    pub fn violations(&self) -> Vec<LexiconViolation> {
        let mut violations = Vec::new();
        let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
        for (canonical, alternatives) in &self.entries {
            if alternatives.contains(canonical) {
                violations.push(LexiconViolation::SelfReference {
                    canonical: canonical.clone(),
                });
            }
            for alternative in alternatives {
                owners
                    .entry(alternative.as_str())
                    .or_default()
                    .push(canonical.as_str());
            }
        }
        let mut shared: Vec<(&str, Vec<&str>)> = owners
            .into_iter()
            .filter(|(_, canonicals)| canonicals.len() > 1)
            .collect();
        shared.sort_by_key(|(alternative, _)| *alternative);
        violations.extend(shared.into_iter().map(|(alternative, canonicals)| {
            LexiconViolation::SharedAlternative {
                alternative: alternative.to_string(),
                canonicals: canonicals.into_iter().map(String::from).collect(),
            }
        }));
        violations
    }
}

impl FromIterator<(String, BTreeSet<String>)> for Lexicon {
    fn from_iter<T: IntoIterator<Item = (String, BTreeSet<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Counters collected while building a lexicon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Relation records read from the source.
    pub relations: usize,
    /// Generic concepts that resolved to no string form.
    pub unresolved: usize,
    /// Records folded into an earlier record with the same canonical name.
    pub merged: usize,
    /// Alternatives dropped because they equal their own canonical name.
    pub self_references: usize,
    /// Alternatives dropped because they equal another entry's canonical name.
    pub foreign_canonicals: usize,
    /// Distinct alternative terms seen before the ambiguity filter.
    pub distinct_terms: usize,
    /// Terms removed because they occurred under more than one entry.
    pub ambiguous_terms: usize,
    /// Phrases dropped from the no-repeats variant after collapsing onto another entry's phrase.
    pub phrase_collisions: usize,
    /// Entries in the final lexicon.
    pub entries: usize,
    /// Alternatives in the final lexicon.
    pub alternatives: usize,
}

impl BuildStats {
    /// Share of distinct terms removed as ambiguous, in percent.
    pub fn ambiguous_percentage(&self) -> f64 {
        if self.distinct_terms == 0 {
            0.0
        } else {
            self.ambiguous_terms as f64 / self.distinct_terms as f64 * 100.0
        }
    }
}

/// Every artifact produced by one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct LexiconBuild {
    pub lexicon: Lexicon,
    /// Same lexicon with repeated tokens removed from each phrase.
    pub lexicon_no_repeats: Lexicon,
    pub ambiguous_terms: BTreeSet<String>,
    /// Alternatives after per-entry dedup, before the ambiguity filter.
    pub audit: Vec<AuditRow>,
    /// Records whose generic concept had no string form.
    pub unresolved: Vec<RecordIndex>,
    pub stats: BuildStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let mut lexicon = Lexicon::new();
        assert!(lexicon.insert_entry("aspirin".to_string(), set(&["bayer"])));
        assert!(!lexicon.insert_entry("aspirin".to_string(), set(&["ecotrin"])));
        assert_eq!(lexicon.get("aspirin"), Some(&set(&["bayer"])));
    }

    #[test]
    fn test_violations_report_self_and_shared() {
        let lexicon: Lexicon = [
            ("a".to_string(), set(&["a", "x"])),
            ("b".to_string(), set(&["x", "y"])),
        ]
        .into_iter()
        .collect();
        let violations = lexicon.violations();
        assert_eq!(violations.len(), 2);
        assert!(violations.contains(&LexiconViolation::SelfReference {
            canonical: "a".to_string()
        }));
        assert!(violations.contains(&LexiconViolation::SharedAlternative {
            alternative: "x".to_string(),
            canonicals: vec!["a".to_string(), "b".to_string()],
        }));
    }

    #[test]
    fn test_clean_lexicon_has_no_violations() {
        let lexicon: Lexicon = [
            ("imatinib".to_string(), set(&["gleevec"])),
            ("ibuprofen".to_string(), set(&["advil", "motrin"])),
        ]
        .into_iter()
        .collect();
        assert!(lexicon.violations().is_empty());
        assert_eq!(lexicon.canonical_for("motrin"), Some("ibuprofen"));
        assert_eq!(lexicon.alternative_count(), 3);
    }

    #[test]
    fn test_ambiguous_percentage_handles_zero() {
        let stats = BuildStats::default();
        assert_eq!(stats.ambiguous_percentage(), 0.0);
        let stats = BuildStats {
            distinct_terms: 8,
            ambiguous_terms: 2,
            ..BuildStats::default()
        };
        assert!((stats.ambiguous_percentage() - 25.0).abs() < 1e-9);
    }
}
