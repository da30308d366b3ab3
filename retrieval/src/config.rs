//! Model profiles and embedder configuration.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// A named embedding-model configuration.
///
/// Each profile fixes the model identifier sent to the runner, the
/// vector dimensionality, and the on-disk index file name. A profile
/// owns exactly one index file; indexes are never shared or migrated
/// between profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelProfile {
    /// mxbai-embed-large, 1024 dimensions.
    MxbaiEmbedLarge,
    /// llama3, 4096 dimensions.
    Llama3,
    /// nomic-embed-text, 768 dimensions.
    NomicEmbedText,
}

impl ModelProfile {
    /// All recognized profiles.
    pub fn all() -> [ModelProfile; 3] {
        [
            ModelProfile::MxbaiEmbedLarge,
            ModelProfile::Llama3,
            ModelProfile::NomicEmbedText,
        ]
    }

    /// Model identifier sent to the embedding-model runner.
    pub fn model_id(self) -> &'static str {
        match self {
            ModelProfile::MxbaiEmbedLarge => "mxbai-embed-large",
            ModelProfile::Llama3 => "llama3",
            ModelProfile::NomicEmbedText => "nomic-embed-text",
        }
    }

    /// Expected embedding dimensionality.
    pub fn dimension(self) -> usize {
        match self {
            ModelProfile::MxbaiEmbedLarge => 1024,
            ModelProfile::Llama3 => 4096,
            ModelProfile::NomicEmbedText => 768,
        }
    }

    /// File name of this profile's on-disk index.
    pub fn index_file_name(self) -> &'static str {
        match self {
            ModelProfile::MxbaiEmbedLarge => "mxbai_index",
            ModelProfile::Llama3 => "llama3_index",
            ModelProfile::NomicEmbedText => "nomic_index",
        }
    }
}

impl FromStr for ModelProfile {
    type Err = RetrievalError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "mxbai-embed-large" => Ok(ModelProfile::MxbaiEmbedLarge),
            "llama3" => Ok(ModelProfile::Llama3),
            "nomic-embed-text" => Ok(ModelProfile::NomicEmbedText),
            other => Err(RetrievalError::UnknownProfile(other.to_string())),
        }
    }
}

impl std::fmt::Display for ModelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_id())
    }
}

/// Configuration for the embedder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderConfig {
    /// Directory whose files are embedded and made queryable.
    pub codebase_dir: PathBuf,

    /// Directory holding one index file per model profile.
    pub index_dir: PathBuf,
}

impl EmbedderConfig {
    /// Create a new configuration.
    pub fn new(codebase_dir: impl Into<PathBuf>, index_dir: impl Into<PathBuf>) -> Self {
        Self {
            codebase_dir: codebase_dir.into(),
            index_dir: index_dir.into(),
        }
    }

    /// Set the codebase directory.
    pub fn with_codebase_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.codebase_dir = dir.into();
        self
    }

    /// Set the index directory.
    pub fn with_index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.index_dir = dir.into();
        self
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self::new("./codebase", "./vector_dbs")
    }
}
