//! Settings file handling.
//!
//! Settings come from a TOML file with three tables:
//!
//! ```toml
//! [source]
//! relation = "has_tradename"
//! sab = "RXNORM"
//! language = "ENG"
//!
//! [normalize]
//! delimiter = " / "
//! drop_foreign_canonicals = true
//!
//! [output]
//! dir = "output"
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rxlex_normalize::NormalizeOptions;
use rxlex_source::{HAS_TRADENAME, RrfOptions};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "rxlex.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub normalize: NormalizeOptions,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Relation read from the relation table.
    pub relation: String,
    /// Source vocabulary filter, e.g. `RXNORM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sab: Option<String>,
    /// Language filter for concept names, e.g. `ENG`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            relation: HAS_TRADENAME.to_string(),
            sab: None,
            language: None,
        }
    }
}

impl SourceSettings {
    /// Row filters for the RRF loader.
    pub fn rrf_options(&self) -> RrfOptions {
        RrfOptions {
            sab: self.sab.clone(),
            language: self.language.clone(),
            relation: Some(self.relation.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub relation: Option<String>,
    pub sab: Option<String>,
    pub language: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse settings")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize settings")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(relation) = overrides.relation {
            self.source.relation = relation;
        }
        if overrides.sab.is_some() {
            self.source.sab = overrides.sab;
        }
        if overrides.language.is_some() {
            self.source.language = overrides.language;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        self
    }
}

/// Load settings from `explicit`, or from [`DEFAULT_SETTINGS_FILE`] in `dir`.
///
/// An explicit file must exist. The implicit file is optional and its
/// absence yields defaults. A file that exists but does not parse is an
/// error either way.
pub fn load_settings(explicit: Option<&Path>, dir: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        let settings = Settings::from_file(path)?;
        tracing::info!(path = %path.display(), "loaded settings");
        return Ok(settings);
    }

    let path = dir.join(DEFAULT_SETTINGS_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => {
            let settings = Settings::from_toml(&content)
                .with_context(|| format!("in {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded settings");
            Ok(settings)
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(error) => {
            Err(error).with_context(|| format!("read settings file {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let text = Settings::default().to_toml().unwrap();
        assert!(text.contains("[source]"));
        assert!(text.contains("relation = \"has_tradename\""));
        assert!(!text.contains("sab"));
        assert_eq!(Settings::from_toml(&text).unwrap(), Settings::default());
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let settings = Settings::from_toml("[source]\nsab = \"RXNORM\"\nlanguage = \"ENG\"\n")
            .unwrap()
            .with_overrides(SettingsOverrides {
                language: Some("SPA".to_string()),
                output_dir: Some(PathBuf::from("out")),
                ..SettingsOverrides::default()
            });
        assert_eq!(settings.source.sab.as_deref(), Some("RXNORM"));
        assert_eq!(settings.source.language.as_deref(), Some("SPA"));
        assert_eq!(settings.source.relation, HAS_TRADENAME);
        assert_eq!(settings.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_rrf_options_filter_on_the_relation() {
        let options = SourceSettings::default().rrf_options();
        assert_eq!(options.relation.as_deref(), Some(HAS_TRADENAME));
        assert!(options.sab.is_none());
    }
}
