//! Configuration
//!
//! Every setting has a value in `defaults/tagblock.default.toml`, which is compiled into the
//! crate. A [`Loader`] stacks user files and single-key overrides over it and produces a
//! [`TagblockConfig`].
//!
//! The resulting values are passed by reference to the pieces that need them
//! ([`Matcher`](crate::tagblock::matching::Matcher),
//! [`Classifier`](crate::tagblock::classify::Classifier),
//! [`BlockGrouper`](crate::tagblock::grouping::BlockGrouper)); nothing reads configuration
//! from global state.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/tagblock.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagblockConfig {
    pub matching: MatchingConfig,
    pub classify: ClassifyConfig,
    pub grouping: GroupingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MatchingConfig {
    pub trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ClassifyConfig {
    pub indent_width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GroupingConfig {
    pub max_window: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig { indent_width: 2 }
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        GroupingConfig { max_window: 256 }
    }
}

/// Builds a [`TagblockConfig`] from layered sources.
///
/// Layers apply in the order they are added, later ones winning key by key. The embedded
/// defaults always sit at the bottom, so a user file only needs the keys it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Add a TOML file on top of the current layers; the file must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        let file = File::from(path.as_ref()).format(FileFormat::Toml);
        Loader {
            builder: self.builder.add_source(file),
        }
    }

    /// Force one dotted key, e.g. `matching.trace`, over every file layer
    pub fn set_override<V>(self, key: &str, value: V) -> Result<Self, ConfigError>
    where
        V: Into<ValueKind>,
    {
        Ok(Loader {
            builder: self.builder.set_override(key, value)?,
        })
    }

    pub fn build(self) -> Result<TagblockConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}
