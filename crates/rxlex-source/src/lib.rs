#![deny(unsafe_code)]

pub mod error;
pub mod resolver;
pub mod rrf;
pub mod source;

pub use error::{Result, SourceError};
pub use resolver::{ConceptResolver, ResolveStats};
pub use rrf::{MRCONSO_FILE, MRREL_FILE, RrfOptions, RrfSource};
pub use source::{HAS_TRADENAME, MemorySource, TerminologySource};
