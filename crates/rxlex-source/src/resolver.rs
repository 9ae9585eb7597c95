//! Concept resolution: relation rows to string forms.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use rxlex_model::{ConceptForms, ConceptId, RelationRecord, ResolvedRecord};

use crate::error::Result;
use crate::source::TerminologySource;

/// Counters for one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub records: usize,
    /// Distinct concepts looked up in the source.
    pub lookups: usize,
    /// Records whose generic concept had no string form.
    pub unresolved_generics: usize,
    /// Records whose brand concept had no string form.
    pub empty_brands: usize,
    /// Lookups that failed and were treated as empty.
    pub failed_lookups: usize,
}

/// Resolves concept identifiers to their string forms, caching each concept.
pub struct ConceptResolver<S> {
    source: S,
    cache: HashMap<ConceptId, ConceptForms>,
    failed_lookups: usize,
}

impl<S: TerminologySource> ConceptResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
            failed_lookups: 0,
        }
    }

    /// Read the relation table and number its rows.
    ///
    /// For `has_tradename` the source stores the brand in `CUI1` and the
    /// generic in `CUI2`.
    pub fn relation_records(&self, relation: &str) -> Result<Vec<RelationRecord>> {
        let pairs = self.source.relations_by_type(relation)?;
        Ok(pairs
            .into_iter()
            .enumerate()
            .map(|(index, (brand, generic))| RelationRecord::new(index, generic, brand))
            .collect())
    }

    /// Primary form and remaining forms of a concept.
    ///
    /// A lookup failure is logged and degrades to the empty state.
    pub fn resolve(&mut self, concept: &ConceptId) -> &ConceptForms {
        if !self.cache.contains_key(concept) {
            let forms = match self.source.string_forms(concept) {
                Ok(forms) => forms,
                Err(error) => {
                    warn!(concept = %concept, %error, "concept lookup failed");
                    self.failed_lookups += 1;
                    Vec::new()
                }
            };
            self.cache
                .insert(concept.clone(), ConceptForms::from_forms(forms));
        }
        &self.cache[concept]
    }

    /// Generic concept: primary seeds the canonical name, the rest are alternatives.
    pub fn resolve_generic(&mut self, concept: &ConceptId) -> ConceptForms {
        self.resolve(concept).clone()
    }

    /// Brand concept: every form is an alternative.
    pub fn resolve_brand(&mut self, concept: &ConceptId) -> Vec<String> {
        self.resolve(concept).all().map(String::from).collect()
    }

    /// Resolve every record, keeping source order.
    pub fn resolve_records(
        &mut self,
        records: &[RelationRecord],
    ) -> (Vec<ResolvedRecord>, ResolveStats) {
        let start = Instant::now();
        let failed_before = self.failed_lookups;
        let mut stats = ResolveStats {
            records: records.len(),
            ..ResolveStats::default()
        };
        let mut resolved = Vec::with_capacity(records.len());
        for record in records {
            let generic = self.resolve_generic(&record.generic);
            let brand_forms = self.resolve_brand(&record.brand);
            if generic.is_empty() {
                stats.unresolved_generics += 1;
                debug!(
                    record = %record.index,
                    concept = %record.generic,
                    "generic concept has no string form"
                );
            }
            if brand_forms.is_empty() {
                stats.empty_brands += 1;
            }
            resolved.push(ResolvedRecord {
                index: record.index,
                generic,
                brand_forms,
            });
        }
        stats.lookups = self.cache.len();
        stats.failed_lookups = self.failed_lookups - failed_before;
        info!(
            records = stats.records,
            lookups = stats.lookups,
            unresolved_generics = stats.unresolved_generics,
            empty_brands = stats.empty_brands,
            failed_lookups = stats.failed_lookups,
            duration_ms = start.elapsed().as_millis(),
            "resolve complete"
        );
        (resolved, stats)
    }
}
