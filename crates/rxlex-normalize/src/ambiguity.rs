//! Removal of alternatives that cannot be attributed to a single entry.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use rxlex_model::{AuditRow, NormalizedRecord};

/// Options for the ambiguity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguityOptions {
    /// Also drop alternatives equal to another record's canonical name.
    pub drop_foreign_canonicals: bool,
}

impl Default for AmbiguityOptions {
    fn default() -> Self {
        Self {
            drop_foreign_canonicals: true,
        }
    }
}

/// What the ambiguity filter removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbiguityReport {
    /// Terms found under more than one record and removed from all of them.
    pub removed: BTreeSet<String>,
    /// Distinct alternatives across all records before global removal.
    pub distinct_terms: usize,
    pub self_references: usize,
    pub foreign_canonicals: usize,
    /// Alternatives per record after per-entry dedup, before global removal.
    pub audit: Vec<AuditRow>,
}

impl AmbiguityReport {
    pub fn ambiguous_percentage(&self) -> f64 {
        if self.distinct_terms == 0 {
            0.0
        } else {
            self.removed.len() as f64 / self.distinct_terms as f64 * 100.0
        }
    }
}

/// Drop alternatives equal to the record's own canonical name.
///
/// Returns how many were dropped.
pub fn remove_self_references(records: &mut [NormalizedRecord]) -> usize {
    let mut removed = 0;
    for record in records.iter_mut() {
        let Some(canonical) = record.canonical.as_deref() else {
            continue;
        };
        let before = record.alternatives.len();
        record
            .alternatives
            .retain(|alternative| alternative != canonical);
        removed += before - record.alternatives.len();
    }
    removed
}

/// Drop alternatives equal to the canonical name of any other record.
pub fn remove_foreign_canonicals(records: &mut [NormalizedRecord]) -> usize {
    let canonicals: HashSet<String> = records
        .iter()
        .filter_map(|record| record.canonical.clone())
        .collect();
    let mut removed = 0;
    for record in records.iter_mut() {
        let before = record.alternatives.len();
        record
            .alternatives
            .retain(|alternative| !canonicals.contains(alternative));
        removed += before - record.alternatives.len();
    }
    removed
}

/// Remove duplicates within each record's pool, keeping first-seen order.
pub fn dedupe_alternatives(records: &mut [NormalizedRecord]) {
    for record in records.iter_mut() {
        let mut seen = HashSet::with_capacity(record.alternatives.len());
        record
            .alternatives
            .retain(|alternative| seen.insert(alternative.clone()));
    }
}

/// Remove every alternative that occurs in more than one record.
///
/// Pools must already be deduplicated per record. Returns the removed terms
/// and the number of distinct terms seen.
pub fn remove_ambiguous(records: &mut [NormalizedRecord]) -> (BTreeSet<String>, usize) {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for record in records.iter() {
        for alternative in &record.alternatives {
            *occurrences.entry(alternative.as_str()).or_default() += 1;
        }
    }
    let distinct = occurrences.len();
    let ambiguous: BTreeSet<String> = occurrences
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(term, _)| term.to_string())
        .collect();

    if !ambiguous.is_empty() {
        for record in records.iter_mut() {
            record
                .alternatives
                .retain(|alternative| !ambiguous.contains(alternative));
        }
    }
    (ambiguous, distinct)
}

/// Run self-removal, per-entry dedup and global removal, in that order.
pub fn filter_ambiguity(
    records: &mut [NormalizedRecord],
    options: AmbiguityOptions,
) -> AmbiguityReport {
    let self_references = remove_self_references(records);
    let foreign_canonicals = if options.drop_foreign_canonicals {
        remove_foreign_canonicals(records)
    } else {
        0
    };
    dedupe_alternatives(records);

    let audit = audit_rows(records);
    let (removed, distinct_terms) = remove_ambiguous(records);

    AmbiguityReport {
        removed,
        distinct_terms,
        self_references,
        foreign_canonicals,
        audit,
    }
}

fn audit_rows(records: &[NormalizedRecord]) -> Vec<AuditRow> {
    records
        .iter()
        .flat_map(|record| {
            record.alternatives.iter().map(|alternative| AuditRow {
                record: record.index,
                canonical: record.canonical.clone(),
                alternative: alternative.clone(),
            })
        })
        .collect()
}
