//! Persistent flat inner-product index.
//!
//! The index stores embeddings in insertion order; an entry's position is
//! its identity. Search is exact brute-force inner product over every
//! stored vector. The whole index is rewritten to disk on every save.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::similarity::find_top_k;

/// An entry in the flat index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Identifier of the embedded source, typically a file name.
    pub id: String,

    /// The embedding vector.
    pub embedding: Embedding,
}

/// A search hit returned by [`FlatIndex::search`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the entry in insertion order.
    pub position: usize,

    /// Identifier stored with the entry.
    pub id: String,

    /// Inner-product similarity score.
    pub score: f32,
}

/// On-disk representation of the index.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// An exact inner-product similarity index over embeddings.
///
/// Entries are kept in insertion order and never removed or updated.
pub struct FlatIndex {
    /// Stored entries, position == insertion order.
    entries: Vec<IndexEntry>,

    /// Expected dimension of embeddings.
    dimension: usize,

    /// Backing file, if the index is persistent.
    path: Option<PathBuf>,
}

impl FlatIndex {
    /// Create a new in-memory index.
    pub fn new(dimension: usize) -> Self {
        Self {
            entries: Vec::new(),
            dimension,
            path: None,
        }
    }

    /// Open a persistent index, loading it from `path` if the file
    /// exists and otherwise creating it empty and writing it to disk
    /// immediately, so a fresh index always has a file.
    pub fn open(path: impl AsRef<Path>, dimension: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let persisted: PersistedIndex = serde_json::from_str(&content)?;

            if persisted.dimension != dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dimension,
                    actual: persisted.dimension,
                });
            }
            for entry in &persisted.entries {
                if entry.embedding.len() != dimension {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: dimension,
                        actual: entry.embedding.len(),
                    });
                }
            }

            info!(
                "Loaded {} entries from index at {}",
                persisted.entries.len(),
                path.display()
            );
            Ok(Self {
                entries: persisted.entries,
                dimension,
                path: Some(path),
            })
        } else {
            let index = Self {
                entries: Vec::new(),
                dimension,
                path: Some(path),
            };
            index.save()?;
            Ok(index)
        }
    }

    /// Expected embedding dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by position.
    pub fn entry(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    /// Append an embedding, returning its position.
    ///
    /// The embedding's length must match the index dimension; a mismatch
    /// is rejected before anything is stored.
    pub fn append(&mut self, id: impl Into<String>, embedding: Embedding) -> Result<usize> {
        if embedding.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let id = id.into();
        let position = self.entries.len();
        self.entries.push(IndexEntry { id: id.clone(), embedding });
        debug!("Appended entry {position} to index: {id}");

        Ok(position)
    }

    /// Persist the index, rewriting the whole backing file.
    ///
    /// A no-op for in-memory indexes.
    pub fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let persisted = PersistedIndex {
            dimension: self.dimension,
            entries: self.entries.clone(),
        };
        fs::write(path, serde_json::to_string(&persisted)?)?;
        debug!("Saved {} entries to {}", self.entries.len(), path.display());

        Ok(())
    }

    /// Search for the `k` entries most similar to `query` by inner
    /// product, most similar first. Returns fewer than `k` hits when the
    /// index holds fewer entries.
    pub fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let top = find_top_k(query, self.entries.iter().map(|e| &e.embedding), k)?;

        Ok(top
            .into_iter()
            .map(|(position, score)| SearchHit {
                position,
                id: self.entries[position].id.clone(),
                score,
            })
            .collect())
    }
}
