use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use rxlex_cli::settings::{Settings, SettingsOverrides, load_settings};
use rxlex_model::BuildStats;
use rxlex_normalize::build_lexicon;
use rxlex_output::{ArtifactPaths, write_artifacts};
use rxlex_source::RrfSource;

use crate::cli::BuildArgs;

/// Outcome of one `build` run, for the summary table.
#[derive(Debug)]
pub struct BuildResult {
    pub relation: String,
    pub stats: BuildStats,
    pub output_dir: PathBuf,
    /// `None` on a dry run.
    pub artifacts: Option<ArtifactPaths>,
}

pub fn run_defaults() -> Result<()> {
    print!("{}", Settings::default().to_toml()?);
    Ok(())
}

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let settings = load_settings(args.config.as_deref(), Path::new("."))?.with_overrides(
        SettingsOverrides {
            relation: args.relation.clone(),
            sab: args.sab.clone(),
            language: args.language.clone(),
            output_dir: args.output_dir.clone(),
        },
    );
    let relation = settings.source.relation.clone();
    let span = info_span!("build", relation = %relation);
    let _guard = span.enter();
    let start = Instant::now();

    let source = RrfSource::open(&args.mrrel, &args.mrconso, &settings.source.rrf_options())
        .context("load RRF tables")?;
    let build = build_lexicon(&source, &relation, &settings.normalize)
        .with_context(|| format!("build lexicon from {relation}"))?;

    let output_dir = settings.output.dir.clone();
    let artifacts = if args.dry_run {
        info!("dry run, no artifacts written");
        None
    } else {
        Some(
            write_artifacts(&output_dir, &build)
                .with_context(|| format!("write artifacts to {}", output_dir.display()))?,
        )
    };

    info!(
        entries = build.stats.entries,
        duration_ms = start.elapsed().as_millis(),
        "build complete"
    );
    Ok(BuildResult {
        relation,
        stats: build.stats,
        output_dir,
        artifacts,
    })
}
