//! Codebase embedding orchestrator.

use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use semsearch_embeddings::{EmbeddingProvider, EmbeddingRequest, FlatIndex};
use semsearch_embeddings::error::EmbeddingError;

use crate::config::{EmbedderConfig, ModelProfile};
use crate::error::{Result, RetrievalError};

/// A query hit resolved back to a codebase file.
#[derive(Debug, Clone)]
pub struct QueryHit {
    /// Inner-product similarity score.
    pub score: f32,

    /// Raw position of the entry in the index.
    pub position: usize,

    /// File name persisted with the entry.
    pub file: String,
}

/// Orchestrates the embed-and-retrieve workflow for one model profile.
///
/// Construction lists the codebase files once; that ordered list is the
/// identity mapping for the instance's lifetime. Each profile owns one
/// persistent index, loaded at construction or created empty and written
/// to disk immediately.
pub struct Embedder<P> {
    /// Active model profile.
    profile: ModelProfile,

    /// Directories for codebase files and index files.
    config: EmbedderConfig,

    /// Ordered codebase file names; position is a file's identity.
    files: Vec<String>,

    /// The profile's persistent index.
    index: FlatIndex,

    /// Embedding provider.
    provider: P,
}

impl<P: EmbeddingProvider> Embedder<P> {
    /// Create an embedder for the given profile.
    pub fn new(profile: ModelProfile, config: EmbedderConfig, provider: P) -> Result<Self> {
        let files = list_files(&config.codebase_dir)?;
        debug!("Listed {} codebase files", files.len());

        let index_path = config.index_dir.join(profile.index_file_name());
        let index = FlatIndex::open(&index_path, profile.dimension())?;

        Ok(Self {
            profile,
            config,
            files,
            index,
            provider,
        })
    }

    /// Create an embedder from a profile name.
    ///
    /// An unrecognized name fails before any filesystem access.
    pub fn with_profile_name(name: &str, config: EmbedderConfig, provider: P) -> Result<Self> {
        let profile = name.parse::<ModelProfile>()?;
        Self::new(profile, config, provider)
    }

    /// The active model profile.
    pub fn profile(&self) -> ModelProfile {
        self.profile
    }

    /// The ordered codebase file list.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of vectors stored in the index.
    pub fn stored(&self) -> usize {
        self.index.len()
    }

    /// Embed the codebase file at `position` and persist the index.
    ///
    /// The returned vector's length must equal the profile's
    /// dimensionality; a mismatch is rejected before insertion, leaving
    /// the index entry count unchanged.
    pub async fn embed_file(&mut self, position: usize) -> Result<()> {
        let name = self
            .files
            .get(position)
            .cloned()
            .ok_or(RetrievalError::FilePosition {
                position,
                count: self.files.len(),
            })?;

        let text = tokio::fs::read_to_string(self.config.codebase_dir.join(&name)).await?;

        let response = self
            .provider
            .embed(EmbeddingRequest::new(text).with_model(self.profile.model_id()))
            .await?;

        if response.embedding.len() != self.profile.dimension() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.profile.dimension(),
                actual: response.embedding.len(),
            }
            .into());
        }

        self.index.append(&name, response.embedding)?;
        self.index.save()?;
        debug!("Embedded {name} at position {position}");

        Ok(())
    }

    /// Embed every codebase file, in file-list order, sequentially.
    ///
    /// Aborts on the first failure; entries inserted before the failure
    /// remain persisted. Re-running re-inserts every file again (there
    /// is no duplicate detection). Returns the number of files embedded
    /// in this pass.
    pub async fn embed_codebase(&mut self) -> Result<usize> {
        for position in 0..self.files.len() {
            self.embed_file(position).await?;
            info!("File {position} embedded");
        }
        info!("Codebase embedded ({} files)", self.files.len());
        Ok(self.files.len())
    }

    /// Embed `prompt` and return the `k` most similar stored vectors,
    /// most similar first, resolved back to file names.
    ///
    /// Returns fewer than `k` hits when the index holds fewer entries.
    pub async fn query(&self, prompt: &str, k: usize) -> Result<Vec<QueryHit>> {
        let response = self
            .provider
            .embed(EmbeddingRequest::new(prompt).with_model(self.profile.model_id()))
            .await?;

        let hits = self.index.search(&response.embedding, k)?;

        Ok(hits
            .into_iter()
            .map(|hit| QueryHit {
                score: hit.score,
                position: hit.position,
                file: hit.id,
            })
            .collect())
    }
}

/// List the regular files directly under `dir`, sorted by name.
///
/// The sorted order is the positional identity used by the index, so it
/// must be stable across runs over an unchanged directory.
fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(files)
}
