#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod lexicon;
pub mod record;

pub use error::{ModelError, Result};
pub use ids::{ConceptId, RecordIndex};
pub use lexicon::{BuildStats, Lexicon, LexiconBuild, LexiconViolation};
pub use record::{AuditRow, ConceptForms, NormalizedRecord, RelationRecord, ResolvedRecord};
