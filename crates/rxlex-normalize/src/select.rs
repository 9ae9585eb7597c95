//! Canonical name selection and merging of records that share one.

use std::collections::HashMap;

use tracing::debug;

use rxlex_model::{NormalizedRecord, ResolvedRecord};

use crate::clean::{CleanProfile, NameCleaner};
use crate::split::{split_all, split_primary};

/// Counters for one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub input: usize,
    pub kept: usize,
    pub merged: usize,
    pub unresolved: usize,
}

/// Pick the canonical name of a record and gather its alternative pool.
///
/// The pool holds, in order: other generic forms (routes kept), brand forms
/// (routes stripped), names split off the primary generic form, and the
/// primary generic form with its administration route kept.
pub fn normalize_record(
    cleaner: &NameCleaner,
    delimiter: &str,
    record: &ResolvedRecord,
) -> NormalizedRecord {
    let mut alternatives = Vec::new();

    let other_generics = split_all(
        record
            .generic
            .others
            .iter()
            .map(|form| cleaner.first_clean(form)),
        delimiter,
    );
    alternatives.extend(
        other_generics
            .iter()
            .map(|name| cleaner.finish(name, CleanProfile::OTHER_GENERIC)),
    );

    let brands = split_all(
        record
            .brand_forms
            .iter()
            .map(|form| cleaner.first_clean(form)),
        delimiter,
    );
    alternatives.extend(
        brands
            .iter()
            .map(|name| cleaner.finish(name, CleanProfile::BRAND)),
    );

    let canonical = record.generic.primary.as_deref().map(|primary| {
        let split = split_primary(&cleaner.first_clean(primary), delimiter);
        alternatives.extend(
            split
                .extras
                .iter()
                .map(|extra| cleaner.finish(extra, CleanProfile::EXTRA)),
        );
        alternatives.push(cleaner.finish(&split.primary, CleanProfile::WITH_ROUTE));
        cleaner.finish(&split.primary, CleanProfile::CANONICAL)
    });

    NormalizedRecord::new(record.index, canonical, alternatives)
}

/// Keep the first record for each canonical name; fold later ones into it.
///
/// The later record's whole pool is appended to the kept record's pool and
/// the later record is dropped. Records without a canonical name are never
/// merged.
pub fn merge_duplicate_canonicals(
    records: Vec<NormalizedRecord>,
) -> (Vec<NormalizedRecord>, MergeStats) {
    let mut stats = MergeStats {
        input: records.len(),
        ..MergeStats::default()
    };
    let mut kept: Vec<NormalizedRecord> = Vec::with_capacity(records.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(canonical) = record.canonical.clone() else {
            stats.unresolved += 1;
            kept.push(record);
            continue;
        };
        if let Some(&position) = positions.get(&canonical) {
            let target = &mut kept[position];
            debug!(
                canonical = %canonical,
                kept = %target.index,
                dropped = %record.index,
                "merging duplicate canonical name"
            );
            target.alternatives.extend(record.alternatives);
            target.merged_from.push(record.index);
            stats.merged += 1;
        } else {
            positions.insert(canonical, kept.len());
            kept.push(record);
        }
    }

    stats.kept = kept.len();
    (kept, stats)
}
