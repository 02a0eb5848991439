//! Configuration loader for cxxstyle.
//!
//! `defaults/cxxstyle.default.toml` is embedded into the crate so the documented
//! defaults and the runtime defaults cannot drift. Project files (`cxxstyle.toml`),
//! explicit files and single-key overrides are layered on top, in that order, and the
//! result is deserialized into [`CxxStyleConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use cxxstyle::cxx::options::ClassifierOptions;
use cxxstyle::{classify_with, ClassifyError, OutputFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/cxxstyle.default.toml");

/// File name looked up by [`Loader::for_project`].
pub const PROJECT_FILE: &str = "cxxstyle.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CxxStyleConfig {
    pub classifier: ClassifierOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("failed to serialize classification: {0}")]
    Json(#[from] serde_json::Error),
}

impl CxxStyleConfig {
    /// Classify `source` with the configured options and render it in the configured
    /// output format.
    pub fn render(&self, source: &str) -> Result<String, RenderError> {
        let classification = classify_with(source, &self.classifier)?;
        Ok(classification.render_as(self.output.format)?)
    }
}

/// Layers configuration sources over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Defaults plus `cxxstyle.toml` in `dir`, when present.
    pub fn for_project(dir: impl AsRef<Path>) -> Self {
        Self::new().with_optional_file(dir.as_ref().join(PROJECT_FILE))
    }

    /// Layer a file that must exist; a missing file fails at [`Loader::build`].
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer TOML text, e.g. a `[classifier]` table embedded in another manifest.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Override one `section.key` value.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<CxxStyleConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<CxxStyleConfig, ConfigError> {
    Loader::new().build()
}
