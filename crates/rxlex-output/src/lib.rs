#![deny(unsafe_code)]

//! Persistence of a lexicon build.
//!
//! Every run writes the same five files into the output directory:
//!
//! - `drug_normalize_dict.json`
//! - `drug_normalize_dict_no_repeats.json`
//! - `list_of_removed_ambiguous_terms.json`
//! - `norm_dict_alt_nodup.csv`
//! - `manifest.json`, written last, hashing the four above

pub mod error;
pub mod hash;
pub mod manifest;
pub mod render;
pub mod write;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use rxlex_model::LexiconBuild;

pub use error::{OutputError, Result};
pub use hash::sha256_hex;
pub use manifest::{ArtifactEntry, MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest};
pub use render::{render_audit, render_lexicon, render_terms};
pub use write::write_atomic;

pub const LEXICON_FILE: &str = "drug_normalize_dict.json";
pub const LEXICON_NO_REPEATS_FILE: &str = "drug_normalize_dict_no_repeats.json";
pub const AMBIGUOUS_TERMS_FILE: &str = "list_of_removed_ambiguous_terms.json";
pub const AUDIT_FILE: &str = "norm_dict_alt_nodup.csv";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Paths of the files written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub lexicon: PathBuf,
    pub lexicon_no_repeats: PathBuf,
    pub ambiguous_terms: PathBuf,
    pub audit: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            lexicon: output_dir.join(LEXICON_FILE),
            lexicon_no_repeats: output_dir.join(LEXICON_NO_REPEATS_FILE),
            ambiguous_terms: output_dir.join(AMBIGUOUS_TERMS_FILE),
            audit: output_dir.join(AUDIT_FILE),
            manifest: output_dir.join(MANIFEST_FILE),
        }
    }

    /// All paths, manifest last.
    pub fn all(&self) -> [&Path; 5] {
        [
            self.lexicon.as_path(),
            self.lexicon_no_repeats.as_path(),
            self.ambiguous_terms.as_path(),
            self.audit.as_path(),
            self.manifest.as_path(),
        ]
    }
}

/// Write every artifact of `build` into `output_dir`, creating it if needed.
pub fn write_artifacts(output_dir: &Path, build: &LexiconBuild) -> Result<ArtifactPaths> {
    let start = Instant::now();
    fs::create_dir_all(output_dir).map_err(|source| OutputError::Io {
        operation: "create directory",
        path: output_dir.to_path_buf(),
        source,
    })?;
    let paths = ArtifactPaths::in_dir(output_dir);

    let rendered = [
        (
            LEXICON_FILE,
            &paths.lexicon,
            render_lexicon(LEXICON_FILE, &build.lexicon)?,
        ),
        (
            LEXICON_NO_REPEATS_FILE,
            &paths.lexicon_no_repeats,
            render_lexicon(LEXICON_NO_REPEATS_FILE, &build.lexicon_no_repeats)?,
        ),
        (
            AMBIGUOUS_TERMS_FILE,
            &paths.ambiguous_terms,
            render_terms(AMBIGUOUS_TERMS_FILE, &build.ambiguous_terms)?,
        ),
        (AUDIT_FILE, &paths.audit, render_audit(&build.audit)?),
    ];

    let mut manifest = Manifest::new(
        build.stats,
        build.unresolved.iter().map(|index| index.get()).collect(),
    );
    for (file, path, bytes) in &rendered {
        write_atomic(path, bytes)?;
        debug!(file = %file, bytes = bytes.len(), "artifact written");
        manifest.push(ArtifactEntry::from_bytes(file, bytes));
    }

    let manifest_bytes = render::pretty_json(MANIFEST_FILE, &manifest)?;
    write_atomic(&paths.manifest, &manifest_bytes)?;

    info!(
        output_dir = %output_dir.display(),
        entries = build.lexicon.len(),
        ambiguous_terms = build.ambiguous_terms.len(),
        audit_rows = build.audit.len(),
        duration_ms = start.elapsed().as_millis(),
        "artifacts written"
    );
    Ok(paths)
}

/// Read a manifest written by [`write_artifacts`].
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path).map_err(|source| OutputError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| OutputError::Json {
        artifact: MANIFEST_FILE,
        source,
    })
}
