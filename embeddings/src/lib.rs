//! # Embeddings
//!
//! This crate provides embedding generation and exact inner-product
//! similarity search for the semsearch workspace.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                  Embeddings System                     │
//! ├────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► FlatIndex         │
//! │       │                                  │             │
//! │       ▼                                  ▼             │
//! │  Ollama HTTP API               on-disk JSON index      │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod index;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use index::{FlatIndex, SearchHit};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OllamaProvider};
pub use similarity::{dot_product, find_top_k};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
