#![deny(unsafe_code)]

//! Drug-name normalization: cleaning, canonical selection, ambiguity
//! filtering and lexicon assembly.

pub mod ambiguity;
pub mod assemble;
pub mod clean;
pub mod error;
pub mod options;
pub mod phrase;
pub mod pipeline;
pub mod select;
pub mod split;

pub use ambiguity::{AmbiguityOptions, AmbiguityReport, filter_ambiguity};
pub use assemble::{Assembly, assemble};
pub use clean::{CleanProfile, NameCleaner};
pub use error::{NormalizeError, Result};
pub use options::NormalizeOptions;
pub use phrase::{PhraseDedup, dedupe_lexicon, dedupe_phrase, has_repeated_tokens};
pub use pipeline::{LexiconPipeline, build_lexicon};
pub use select::{MergeStats, merge_duplicate_canonicals, normalize_record};
pub use split::{SplitName, split_all, split_primary};
