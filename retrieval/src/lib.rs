//! # Retrieval
//!
//! This crate orchestrates the codebase embedding workflow:
//!
//! - **Model profiles**: named embedding-model configurations, each with
//!   a fixed dimensionality and its own on-disk index file
//! - **Embedder**: lists codebase files, embeds each one through an
//!   embedding provider, and persists the vectors in a flat
//!   inner-product index
//! - **Query**: embeds a natural-language prompt and resolves the most
//!   similar stored vectors back to file names
//!
//! ## Usage
//!
//! ```rust,ignore
//! use semsearch_embeddings::OllamaProvider;
//! use semsearch_retrieval::{Embedder, EmbedderConfig, ModelProfile};
//!
//! let config = EmbedderConfig::default();
//! let mut embedder = Embedder::new(
//!     ModelProfile::NomicEmbedText,
//!     config,
//!     OllamaProvider::new(),
//! )?;
//! embedder.embed_codebase().await?;
//!
//! let hits = embedder.query("Which file has math functions?", 1).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{EmbedderConfig, ModelProfile};
pub use engine::{Embedder, QueryHit};
pub use error::{Result, RetrievalError};
