//! UMLS Rich Release Format (RRF) loading.
//!
//! MetamorphoSys writes each UMLS table as a pipe-delimited file without a
//! header row; every line carries a trailing `|`. Only two tables are read:
//!
//! - `MRREL.RRF`: `CUI1|AUI1|STYPE1|REL|CUI2|AUI2|STYPE2|RELA|RUI|SRUI|SAB|...`
//! - `MRCONSO.RRF`: `CUI|LAT|TS|LUI|STT|SUI|ISPREF|AUI|SAUI|SCUI|SDUI|SAB|TTY|CODE|STR|...`
//!
//! Row order is kept as it appears in the files, which is the order the
//! source defines for "primary" string forms.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rxlex_model::ConceptId;

use crate::error::{Result, SourceError};
use crate::source::{MemorySource, TerminologySource};

/// Relation table file name.
pub const MRREL_FILE: &str = "MRREL.RRF";
/// Concept-name table file name.
pub const MRCONSO_FILE: &str = "MRCONSO.RRF";

const MRREL_CUI1: usize = 0;
const MRREL_CUI2: usize = 4;
const MRREL_RELA: usize = 7;
const MRREL_SAB: usize = 10;
const MRREL_MIN_COLUMNS: usize = 11;

const MRCONSO_CUI: usize = 0;
const MRCONSO_LAT: usize = 1;
const MRCONSO_SAB: usize = 11;
const MRCONSO_STR: usize = 14;
const MRCONSO_MIN_COLUMNS: usize = 15;

/// Row filters applied while loading RRF tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrfOptions {
    /// Keep only rows from this source vocabulary (e.g. `RXNORM`).
    pub sab: Option<String>,
    /// Keep only concept names in this language (e.g. `ENG`).
    pub language: Option<String>,
    /// Keep only relation rows with this attribute; all relations when `None`.
    pub relation: Option<String>,
}

impl RrfOptions {
    #[must_use]
    pub fn with_sab(mut self, sab: impl Into<String>) -> Self {
        self.sab = Some(sab.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }
}

/// Terminology source backed by `MRREL.RRF` and `MRCONSO.RRF`.
#[derive(Debug, Clone)]
pub struct RrfSource {
    inner: MemorySource,
}

impl RrfSource {
    /// Load both tables from a directory containing `MRREL.RRF` and `MRCONSO.RRF`.
    pub fn open_dir(dir: &Path, options: &RrfOptions) -> Result<Self> {
        Self::open(&dir.join(MRREL_FILE), &dir.join(MRCONSO_FILE), options)
    }

    /// Load both tables from explicit paths.
    pub fn open(mrrel: &Path, mrconso: &Path, options: &RrfOptions) -> Result<Self> {
        let mut inner = MemorySource::new();
        load_relations(mrrel, options, &mut inner)?;
        load_concept_names(mrconso, options, &mut inner)?;
        info!(
            mrrel = %mrrel.display(),
            mrconso = %mrconso.display(),
            relations = inner.relation_count(),
            concepts = inner.concept_count(),
            "loaded rrf tables"
        );
        Ok(Self { inner })
    }

    pub fn relation_count(&self) -> usize {
        self.inner.relation_count()
    }

    pub fn concept_count(&self) -> usize {
        self.inner.concept_count()
    }
}

impl TerminologySource for RrfSource {
    fn relations_by_type(&self, relation: &str) -> Result<Vec<(ConceptId, ConceptId)>> {
        self.inner.relations_by_type(relation)
    }

    fn string_forms(&self, concept: &ConceptId) -> Result<Vec<String>> {
        self.inner.string_forms(concept)
    }
}

fn load_relations(path: &Path, options: &RrfOptions, target: &mut MemorySource) -> Result<()> {
    let mut kept = 0usize;
    let mut skipped = 0usize;
    for_each_row(path, MRREL_MIN_COLUMNS, |line, row| {
        let rela = row.get(MRREL_RELA).unwrap_or("");
        if rela.is_empty()
            || !matches_filter(options.relation.as_deref(), rela)
            || !matches_filter(options.sab.as_deref(), row.get(MRREL_SAB).unwrap_or(""))
        {
            skipped += 1;
            return Ok(());
        }
        let cui1 = concept_at(path, line, row, MRREL_CUI1)?;
        let cui2 = concept_at(path, line, row, MRREL_CUI2)?;
        target.add_relation(rela, cui1, cui2);
        kept += 1;
        Ok(())
    })?;
    debug!(path = %path.display(), kept, skipped, "read relation rows");
    Ok(())
}

fn load_concept_names(path: &Path, options: &RrfOptions, target: &mut MemorySource) -> Result<()> {
    let mut kept = 0usize;
    let mut skipped = 0usize;
    for_each_row(path, MRCONSO_MIN_COLUMNS, |line, row| {
        if !matches_filter(options.sab.as_deref(), row.get(MRCONSO_SAB).unwrap_or(""))
            || !matches_filter(
                options.language.as_deref(),
                row.get(MRCONSO_LAT).unwrap_or(""),
            )
        {
            skipped += 1;
            return Ok(());
        }
        let cui = concept_at(path, line, row, MRCONSO_CUI)?;
        let name = row.get(MRCONSO_STR).unwrap_or("");
        target.add_forms(cui, [name]);
        kept += 1;
        Ok(())
    })?;
    debug!(path = %path.display(), kept, skipped, "read concept name rows");
    Ok(())
}

fn for_each_row<F>(path: &Path, min_columns: usize, mut handle: F) -> Result<()>
where
    F: FnMut(u64, &StringRecord) -> Result<()>,
{
    if !path.exists() {
        return Err(SourceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    // RRF has no quoting: a `"` inside a name is literal.
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .map_err(|source| SourceError::RrfRead {
            path: path.to_path_buf(),
            source,
        })?;
    let mut row = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut row)
            .map_err(|source| SourceError::RrfRead {
                path: path.to_path_buf(),
                source,
            })?;
        if !more {
            break;
        }
        let line = row.position().map_or(0, csv::Position::line);
        if row.len() == 1 && row.get(0).is_some_and(str::is_empty) {
            continue;
        }
        if row.len() < min_columns {
            return Err(SourceError::ShortRow {
                path: path.to_path_buf(),
                line,
                expected: min_columns,
                found: row.len(),
            });
        }
        handle(line, &row)?;
    }
    Ok(())
}

fn concept_at(path: &Path, line: u64, row: &StringRecord, column: usize) -> Result<ConceptId> {
    ConceptId::new(row.get(column).unwrap_or("")).map_err(|source| SourceError::InvalidConcept {
        path: path.to_path_buf(),
        line,
        source,
    })
}

fn matches_filter(filter: Option<&str>, value: &str) -> bool {
    filter.is_none_or(|wanted| wanted.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_filter_matches_everything() {
        assert!(matches_filter(None, "RXNORM"));
        assert!(matches_filter(Some("rxnorm"), "RXNORM"));
        assert!(!matches_filter(Some("RXNORM"), "MSH"));
    }

    #[test]
    fn test_options_builder_sets_filters() {
        let options = RrfOptions::default()
            .with_sab("RXNORM")
            .with_language("ENG")
            .with_relation("has_tradename");
        assert_eq!(options.sab.as_deref(), Some("RXNORM"));
        assert_eq!(options.language.as_deref(), Some("ENG"));
        assert_eq!(options.relation.as_deref(), Some("has_tradename"));
    }
}
