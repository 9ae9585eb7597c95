//! Build manifest: what was written, when, and with which content.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use rxlex_model::BuildStats;

use crate::hash::sha256_hex;

pub const MANIFEST_SCHEMA: &str = "rxlex.manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub schema: String,
    pub schema_version: u32,
    /// Version of the tool that produced the artifacts.
    pub generator: String,
    pub generated_at: String,
    pub stats: BuildStats,
    pub unresolved_records: Vec<usize>,
    pub artifacts: Vec<ArtifactEntry>,
}

/// One written file, named relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub file: String,
    pub bytes: usize,
    pub sha256: String,
}

impl ArtifactEntry {
    pub fn from_bytes(file: &str, bytes: &[u8]) -> Self {
        Self {
            file: file.to_string(),
            bytes: bytes.len(),
            sha256: sha256_hex(bytes),
        }
    }
}

impl Manifest {
    pub fn new(stats: BuildStats, unresolved_records: Vec<usize>) -> Self {
        Self {
            schema: MANIFEST_SCHEMA.to_string(),
            schema_version: MANIFEST_SCHEMA_VERSION,
            generator: format!("rxlex {}", env!("CARGO_PKG_VERSION")),
            generated_at: Utc::now().to_rfc3339(),
            stats,
            unresolved_records,
            artifacts: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ArtifactEntry) {
        self.artifacts.push(entry);
    }

    pub fn artifact(&self, file: &str) -> Option<&ArtifactEntry> {
        self.artifacts.iter().find(|entry| entry.file == file)
    }
}
