//! `semsearch` binary: embed a codebase directory and query it.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use semsearch_embeddings::OllamaProvider;
use semsearch_retrieval::{Embedder, EmbedderConfig, ModelProfile};

#[derive(Debug, Parser)]
#[command(name = "semsearch", about = "Embed a codebase and query it by similarity")]
struct Cli {
    /// Directory whose files are embedded and made queryable
    #[arg(long, value_name = "PATH", default_value = "./codebase")]
    codebase_dir: PathBuf,

    /// Directory holding one index file per model profile
    #[arg(long, value_name = "PATH", default_value = "./vector_dbs")]
    index_dir: PathBuf,

    /// Base URL of the Ollama server
    #[arg(long, value_name = "URL", default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Model profile to use (defaults to all profiles)
    #[arg(short, long, value_name = "MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Embed every codebase file into the profile's index
    Embed,

    /// Query the index for the most similar files
    Query {
        /// Natural-language prompt
        #[arg(value_name = "PROMPT")]
        prompt: String,

        /// Number of results to return
        #[arg(short = 'n', long, default_value_t = 1)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let profiles: Vec<ModelProfile> = match &cli.model {
        Some(name) => vec![name.parse()?],
        None => ModelProfile::all().to_vec(),
    };

    let config = EmbedderConfig::new(&cli.codebase_dir, &cli.index_dir);

    for profile in profiles {
        let provider = OllamaProvider::new()
            .with_base_url(&cli.ollama_url)
            .with_model(profile.model_id());
        let mut embedder = Embedder::new(profile, config.clone(), provider)?;

        match &cli.command {
            Command::Embed => {
                let embedded = embedder.embed_codebase().await?;
                println!("[{profile}] embedded {embedded} files");
            }
            Command::Query { prompt, limit } => {
                let hits = embedder.query(prompt, *limit).await?;

                println!("---From {profile}----");
                for hit in &hits {
                    println!("score {:.4}  position {}  file {}", hit.score, hit.position, hit.file);
                }
                if let Some(best) = hits.first() {
                    println!("most relevant file: {}", best.file);
                } else {
                    println!("index is empty");
                }
            }
        }
    }

    Ok(())
}
