//! In-memory rendering of each artifact.
//!
//! Rendering is kept apart from writing so the manifest can hash exactly the
//! bytes that land on disk.

use std::collections::BTreeSet;

use rxlex_model::{AuditRow, Lexicon};

use crate::error::{OutputError, Result};

/// Pretty JSON object of canonical name to sorted alternatives.
pub fn render_lexicon(artifact: &'static str, lexicon: &Lexicon) -> Result<Vec<u8>> {
    pretty_json(artifact, lexicon)
}

/// Pretty JSON array of terms, sorted.
pub fn render_terms(artifact: &'static str, terms: &BTreeSet<String>) -> Result<Vec<u8>> {
    pretty_json(artifact, terms)
}

/// CSV with a `record,canonical,alternative` header.
///
/// An unresolved record leaves the canonical column empty.
pub fn render_audit(rows: &[AuditRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["record", "canonical", "alternative"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|error| OutputError::Csv(csv::Error::from(error.into_error())))
}

pub(crate) fn pretty_json<T: serde::Serialize + ?Sized>(
    artifact: &'static str,
    value: &T,
) -> Result<Vec<u8>> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|source| OutputError::Json { artifact, source })?;
    Ok(format!("{json}\n").into_bytes())
}
