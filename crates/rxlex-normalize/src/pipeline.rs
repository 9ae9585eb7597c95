//! Orchestration of the normalization stages.
//!
//! Stages run in a fixed order, each consuming the whole output of the one
//! before it:
//!
//! 1. canonical selection per record
//! 2. merge of records sharing a canonical name
//! 3. ambiguity filter
//! 4. assembly
//! 5. phrase dedup into the no-repeats variant

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use rxlex_model::{BuildStats, Lexicon, LexiconBuild, ResolvedRecord};
use rxlex_source::{ConceptResolver, TerminologySource};

use crate::ambiguity::{AmbiguityOptions, filter_ambiguity};
use crate::assemble::assemble;
use crate::clean::NameCleaner;
use crate::error::{NormalizeError, Result};
use crate::options::NormalizeOptions;
use crate::phrase::dedupe_lexicon;
use crate::select::{merge_duplicate_canonicals, normalize_record};

/// Normalization pipeline with validated options.
#[derive(Debug, Clone)]
pub struct LexiconPipeline {
    options: NormalizeOptions,
    cleaner: NameCleaner,
}

impl LexiconPipeline {
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        options.validate()?;
        let cleaner = NameCleaner::new(&options);
        Ok(Self { options, cleaner })
    }

    /// Build the lexicon and its side artifacts from resolved records.
    pub fn run(&self, records: &[ResolvedRecord]) -> Result<LexiconBuild> {
        let span = info_span!("normalize", records = records.len());
        let _guard = span.enter();
        let run_start = Instant::now();
        let mut stats = BuildStats {
            relations: records.len(),
            ..BuildStats::default()
        };

        let mut normalized = info_span!("select").in_scope(|| {
            let start = Instant::now();
            let normalized: Vec<_> = records
                .iter()
                .map(|record| normalize_record(&self.cleaner, &self.options.delimiter, record))
                .collect();
            let (kept, merge) = merge_duplicate_canonicals(normalized);
            info!(
                input = merge.input,
                kept = merge.kept,
                merged = merge.merged,
                unresolved = merge.unresolved,
                duration_ms = start.elapsed().as_millis(),
                "canonical selection complete"
            );
            stats.merged = merge.merged;
            stats.unresolved = merge.unresolved;
            kept
        });

        let report = info_span!("ambiguity").in_scope(|| {
            let start = Instant::now();
            let options = AmbiguityOptions {
                drop_foreign_canonicals: self.options.drop_foreign_canonicals,
            };
            let report = filter_ambiguity(&mut normalized, options);
            info!(
                distinct_terms = report.distinct_terms,
                ambiguous_terms = report.removed.len(),
                ambiguous_pct = report.ambiguous_percentage(),
                self_references = report.self_references,
                foreign_canonicals = report.foreign_canonicals,
                duration_ms = start.elapsed().as_millis(),
                "ambiguity filter complete"
            );
            report
        });
        stats.self_references = report.self_references;
        stats.foreign_canonicals = report.foreign_canonicals;
        stats.distinct_terms = report.distinct_terms;
        stats.ambiguous_terms = report.removed.len();

        let assembly = info_span!("assemble").in_scope(|| -> Result<_> {
            let start = Instant::now();
            let assembly = assemble(&normalized)?;
            if !assembly.unresolved.is_empty() {
                warn!(
                    unresolved = assembly.unresolved.len(),
                    "records without a canonical name were left out"
                );
            }
            debug!(
                entries = assembly.lexicon.len(),
                alternatives = assembly.lexicon.alternative_count(),
                duration_ms = start.elapsed().as_millis(),
                "assembly complete"
            );
            Ok(assembly)
        })?;
        check_invariants("primary", &assembly.lexicon)?;

        let phrases = info_span!("phrase").in_scope(|| {
            let start = Instant::now();
            let phrases =
                dedupe_lexicon(&assembly.lexicon, self.options.drop_foreign_canonicals);
            debug!(
                collisions = phrases.collisions.len(),
                foreign_canonicals = phrases.foreign_canonicals,
                duration_ms = start.elapsed().as_millis(),
                "phrase dedup complete"
            );
            phrases
        });
        check_invariants("no-repeats", &phrases.lexicon)?;

        let mut ambiguous_terms = report.removed;
        stats.phrase_collisions = phrases.collisions.len();
        stats.foreign_canonicals += phrases.foreign_canonicals;
        ambiguous_terms.extend(phrases.collisions);
        stats.entries = assembly.lexicon.len();
        stats.alternatives = assembly.lexicon.alternative_count();

        info!(
            relations = stats.relations,
            entries = stats.entries,
            alternatives = stats.alternatives,
            merged = stats.merged,
            unresolved = stats.unresolved,
            ambiguous_terms = ambiguous_terms.len(),
            duration_ms = run_start.elapsed().as_millis(),
            "lexicon build complete"
        );

        Ok(LexiconBuild {
            lexicon: assembly.lexicon,
            lexicon_no_repeats: phrases.lexicon,
            ambiguous_terms,
            audit: report.audit,
            unresolved: assembly.unresolved,
            stats,
        })
    }
}

/// Read, resolve and normalize one relation of a terminology source.
pub fn build_lexicon<S: TerminologySource>(
    source: S,
    relation: &str,
    options: &NormalizeOptions,
) -> Result<LexiconBuild> {
    let pipeline = LexiconPipeline::new(options.clone())?;
    let mut resolver = ConceptResolver::new(source);
    let resolved = info_span!("resolve", relation = %relation).in_scope(|| -> Result<_> {
        let relations = resolver.relation_records(relation)?;
        let (resolved, _) = resolver.resolve_records(&relations);
        Ok(resolved)
    })?;
    pipeline.run(&resolved)
}

fn check_invariants(variant: &'static str, lexicon: &Lexicon) -> Result<()> {
    let violations = lexicon.violations();
    if violations.is_empty() {
        return Ok(());
    }
    let details = violations
        .iter()
        .map(|violation| format!("{violation:?}"))
        .collect::<Vec<_>>()
        .join("; ");
    Err(NormalizeError::Invariant { variant, details })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxlex_model::{ConceptForms, RecordIndex};

    fn resolved(index: usize, generic: &[&str], brands: &[&str]) -> ResolvedRecord {
        ResolvedRecord {
            index: RecordIndex(index),
            generic: ConceptForms::from_forms(generic.iter().map(|s| s.to_string()).collect()),
            brand_forms: brands.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = NormalizeOptions::default().with_delimiter("");
        assert!(matches!(
            LexiconPipeline::new(options),
            Err(NormalizeError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_stats_follow_the_stages() {
        let pipeline = LexiconPipeline::new(NormalizeOptions::default()).expect("pipeline");
        let build = pipeline
            .run(&[
                resolved(0, &["Imatinib 100 MG Oral Tablet"], &["Gleevec"]),
                resolved(1, &["Imatinib"], &["STI571"]),
                resolved(2, &[], &["Orphan"]),
            ])
            .expect("run");
        assert_eq!(build.stats.relations, 3);
        assert_eq!(build.stats.merged, 1);
        assert_eq!(build.stats.unresolved, 1);
        assert_eq!(build.stats.entries, 1);
        assert_eq!(build.unresolved, vec![RecordIndex(2)]);
        let alternatives: Vec<_> = build
            .lexicon
            .get("imatinib")
            .expect("imatinib entry")
            .iter()
            .cloned()
            .collect();
        assert_eq!(alternatives, vec!["gleevec", "imatinib oral tablet", "sti571"]);
    }

    #[test]
    fn test_empty_input_builds_empty_lexicon() {
        let pipeline = LexiconPipeline::new(NormalizeOptions::default()).expect("pipeline");
        let build = pipeline.run(&[]).expect("run");
        assert!(build.lexicon.is_empty());
        assert!(build.lexicon_no_repeats.is_empty());
        assert!(build.ambiguous_terms.is_empty());
        assert_eq!(build.stats, BuildStats::default());
    }
}
