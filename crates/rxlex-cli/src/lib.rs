//! CLI library components for the lexicon builder.

pub mod logging;
pub mod settings;
