//! Per-record structures that flow through the normalization pipeline.
//!
//! Each stage consumes one `Vec` of these and produces the next, so every
//! derived field travels with the record it belongs to.

use serde::{Deserialize, Serialize};

use crate::ids::{ConceptId, RecordIndex};

/// One `has_tradename` relation: a generic concept and its brand concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub index: RecordIndex,
    pub generic: ConceptId,
    pub brand: ConceptId,
}

impl RelationRecord {
    pub fn new(index: usize, generic: ConceptId, brand: ConceptId) -> Self {
        Self {
            index: RecordIndex(index),
            generic,
            brand,
        }
    }
}

/// String forms of a single concept, split into primary and remainder.
///
/// `primary` is `None` when the source returned no string for the concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptForms {
    pub primary: Option<String>,
    pub others: Vec<String>,
}

impl ConceptForms {
    /// Split an ordered list of forms; the first one is the primary.
    pub fn from_forms(forms: Vec<String>) -> Self {
        let mut iter = forms.into_iter();
        let primary = iter.next();
        Self {
            primary,
            others: iter.collect(),
        }
    }

    /// Every form in source order, primary first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.primary
            .iter()
            .chain(self.others.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }
}

/// A relation record with both concepts resolved to their string forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub index: RecordIndex,
    pub generic: ConceptForms,
    /// Brand forms carry no primary distinction; all of them are alternatives.
    pub brand_forms: Vec<String>,
}

/// A record after canonical selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub index: RecordIndex,
    /// Cleaned primary generic name; `None` when the generic concept had no form.
    pub canonical: Option<String>,
    /// Alternative pool. May hold duplicates until the ambiguity filter runs.
    pub alternatives: Vec<String>,
    /// Later records whose alternatives were folded into this one.
    pub merged_from: Vec<RecordIndex>,
}

impl NormalizedRecord {
    pub fn new(index: RecordIndex, canonical: Option<String>, alternatives: Vec<String>) -> Self {
        Self {
            index,
            canonical,
            alternatives,
            merged_from: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.canonical.is_some()
    }
}

/// One row of the pre-ambiguity audit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRow {
    pub record: RecordIndex,
    pub canonical: Option<String>,
    pub alternative: String,
}
