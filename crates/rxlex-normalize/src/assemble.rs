//! Assembly of normalized records into a lexicon.

use std::collections::HashMap;

use tracing::warn;

use rxlex_model::{Lexicon, NormalizedRecord, RecordIndex};

use crate::error::{NormalizeError, Result};

/// A lexicon and the records left out of it.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub lexicon: Lexicon,
    /// Records whose generic concept had no string form.
    pub unresolved: Vec<RecordIndex>,
}

/// Build the lexicon from records whose canonical names are already unique.
///
/// Records without a canonical name are left out and listed. A canonical
/// name seen twice means the merge step did not run and is an error.
pub fn assemble(records: &[NormalizedRecord]) -> Result<Assembly> {
    let mut assembly = Assembly::default();
    let mut owners: HashMap<&str, RecordIndex> = HashMap::new();

    for record in records {
        let Some(canonical) = record.canonical.as_deref() else {
            warn!(
                record = %record.index,
                alternatives = record.alternatives.len(),
                "record has no canonical name; left out of the lexicon"
            );
            assembly.unresolved.push(record.index);
            continue;
        };
        if let Some(&first) = owners.get(canonical) {
            return Err(NormalizeError::DuplicateCanonical {
                canonical: canonical.to_string(),
                first,
                second: record.index,
            });
        }
        owners.insert(canonical, record.index);
        assembly
            .lexicon
            .insert_entry(canonical.to_string(), record.alternatives.iter().cloned());
    }

    Ok(assembly)
}
