//! Linker configuration.
//!
//! Settings are plain data with builder-style setters, and can be stored as
//! TOML:
//!
//! ```toml
//! mode = "test"
//! use_discourse_model = true
//! remove_unresolved_mentions = true
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// =============================================================================
// LinkerMode
// =============================================================================

/// What a linker run is for. Fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkerMode {
    /// Apply trained resolvers.
    #[default]
    Test,
    /// Feed labelled mentions to the resolvers so they can be trained.
    Train,
    /// Apply resolvers in labelled mode; scoring happens elsewhere.
    Eval,
    /// Similarity-only: contexts are built without gender/number and the
    /// resolver cascade is not run.
    Sim,
}

impl LinkerMode {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LinkerMode::Test => "test",
            LinkerMode::Train => "train",
            LinkerMode::Eval => "eval",
            LinkerMode::Sim => "sim",
        }
    }

    /// Whether gender and number are estimated for mention contexts.
    #[must_use]
    pub const fn computes_attributes(&self) -> bool {
        !matches!(self, LinkerMode::Sim)
    }
}

impl fmt::Display for LinkerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkerMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(LinkerMode::Test),
            "train" => Ok(LinkerMode::Train),
            "eval" => Ok(LinkerMode::Eval),
            "sim" => Ok(LinkerMode::Sim),
            other => Err(Error::config(format!(
                "unrecognized linker mode '{}' (expected test, train, eval or sim)",
                other
            ))),
        }
    }
}

// =============================================================================
// LinkerConfig
// =============================================================================

/// Configuration for a [`crate::Linker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Run mode
    pub mode: LinkerMode,
    /// Attach resolved mentions to their antecedent entity. When false
    /// every mention becomes its own entity and coreference is expressed
    /// only through shared ids.
    pub use_discourse_model: bool,
    /// Drop mentions no resolver applies to instead of starting a
    /// singleton entity for them.
    pub remove_unresolved_mentions: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            mode: LinkerMode::Test,
            use_discourse_model: true,
            remove_unresolved_mentions: true,
        }
    }
}

impl LinkerConfig {
    /// Default configuration in the given mode.
    #[must_use]
    pub fn new(mode: LinkerMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the run mode.
    #[must_use]
    pub fn with_mode(mut self, mode: LinkerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Toggle the discourse model (false = flat mode).
    #[must_use]
    pub fn with_discourse_model(mut self, enabled: bool) -> Self {
        self.use_discourse_model = enabled;
        self
    }

    /// Toggle dropping of mentions no resolver applies to.
    #[must_use]
    pub fn with_remove_unresolved_mentions(mut self, enabled: bool) -> Self {
        self.remove_unresolved_mentions = enabled;
        self
    }

    /// Parse a TOML document. Missing keys take their default.
    ///
    /// # Errors
    ///
    /// [`Error::Toml`] for malformed TOML or an unknown mode.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Toml`] if it
    /// does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded linker config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
