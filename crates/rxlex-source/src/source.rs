//! The read-only terminology interface the lexicon builder depends on.

use std::collections::HashMap;

use rxlex_model::ConceptId;

use crate::error::Result;

/// Relation name linking a generic concept to its brand-name concept.
pub const HAS_TRADENAME: &str = "has_tradename";

/// Read-only access to a relational terminology source.
pub trait TerminologySource {
    /// All `(CUI1, CUI2)` pairs for a relation attribute, in source order.
    fn relations_by_type(&self, relation: &str) -> Result<Vec<(ConceptId, ConceptId)>>;

    /// String forms of a concept in source order. The first one is primary.
    ///
    /// An unknown concept yields an empty list, not an error.
    fn string_forms(&self, concept: &ConceptId) -> Result<Vec<String>>;
}

impl<T: TerminologySource + ?Sized> TerminologySource for &T {
    fn relations_by_type(&self, relation: &str) -> Result<Vec<(ConceptId, ConceptId)>> {
        (**self).relations_by_type(relation)
    }

    fn string_forms(&self, concept: &ConceptId) -> Result<Vec<String>> {
        (**self).string_forms(concept)
    }
}

/// Terminology source held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    relations: Vec<(String, ConceptId, ConceptId)>,
    forms: HashMap<ConceptId, Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relation row `cui1 --relation--> cui2`.
    #[must_use]
    pub fn with_relation(mut self, relation: &str, cui1: ConceptId, cui2: ConceptId) -> Self {
        self.add_relation(relation, cui1, cui2);
        self
    }

    /// Append string forms for a concept, after any it already has.
    #[must_use]
    pub fn with_forms<I, S>(mut self, concept: ConceptId, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_forms(concept, forms);
        self
    }

    pub fn add_relation(&mut self, relation: &str, cui1: ConceptId, cui2: ConceptId) {
        self.relations.push((relation.to_string(), cui1, cui2));
    }

    pub fn add_forms<I, S>(&mut self, concept: ConceptId, forms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forms
            .entry(concept)
            .or_default()
            .extend(forms.into_iter().map(Into::into));
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn concept_count(&self) -> usize {
        self.forms.len()
    }
}

impl TerminologySource for MemorySource {
    fn relations_by_type(&self, relation: &str) -> Result<Vec<(ConceptId, ConceptId)>> {
        Ok(self
            .relations
            .iter()
            .filter(|(name, _, _)| name == relation)
            .map(|(_, cui1, cui2)| (cui1.clone(), cui2.clone()))
            .collect())
    }

    fn string_forms(&self, concept: &ConceptId) -> Result<Vec<String>> {
        Ok(self.forms.get(concept).cloned().unwrap_or_default())
    }
}
