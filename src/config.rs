//! TOML run configuration.
//!
//! ```toml
//! log_level = "info"
//!
//! [engine]
//! max_iterations = 200
//! selective_scheduling = true
//! interval_size = 4096
//!
//! [labels]
//! seed = 7
//! domain = 4
//! default = 0
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::programs::RandomLabels;
use crate::types::{Label, Result, SimError};

/// Default size of the random label domain.
pub const DEFAULT_LABEL_DOMAIN: u32 = 4;

/// Settings for label generation when no label file is given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Seed of the random label source.
    pub seed: u64,
    /// Labels are drawn from `[0, domain)`.
    pub domain: u32,
    /// Label of vertices a label file does not mention.
    pub default: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            domain: DEFAULT_LABEL_DOMAIN,
            default: 0,
        }
    }
}

impl LabelConfig {
    /// Random label source described by this section.
    pub fn random_source(&self) -> RandomLabels {
        RandomLabels::new(self.seed, self.domain)
    }

    /// Fallback label for label files.
    pub fn default_label(&self) -> Label {
        Label(self.default)
    }
}

/// Complete configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Engine settings.
    pub engine: EngineConfig,
    /// Label generation settings.
    pub labels: LabelConfig,
    /// `EnvFilter` directive used when `--log-level` is not given.
    pub log_level: Option<String>,
}

impl SimConfig {
    /// Reads and decodes a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| SimError::Config {
            path: path.to_path_buf(),
            reason: source.to_string(),
        })
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
