//! Medallion command-line interface.
//!
//! ```bash
//! # Convert two documents from bronze into silver
//! medallion process --blob bronze/report.docx --blob bronze/scan.pdf
//!
//! # Convert everything currently in bronze
//! medallion process --all --root ./data
//!
//! # Show what is stored in a container
//! medallion list silver
//!
//! # Run the HTTP trigger
//! medallion serve -H 0.0.0.0 -p 8000
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use medallion::{
    BatchProcessor, BlobStore, DocumentReference, FsBlobStore, MedallionConfig, MedallionError, SOURCE_CONTAINER,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "medallion", version, about = "Extract text from bronze documents into silver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from the given blobs and write it to the silver container
    Process {
        /// Blob to process, as CONTAINER/NAME (repeatable)
        #[arg(long = "blob", value_name = "CONTAINER/NAME", value_parser = parse_reference)]
        blobs: Vec<DocumentReference>,

        /// Process every blob currently stored in the bronze container
        #[arg(long)]
        all: bool,

        /// Path to config file (TOML, YAML, or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Storage root directory, overrides the configured one
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// List the blobs stored in a container
    List {
        container: String,

        /// Path to config file (TOML, YAML, or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Storage root directory, overrides the configured one
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Start the HTTP API server
    #[cfg(feature = "api")]
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to config file (TOML, YAML, or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("medallion=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            blobs,
            all,
            config,
            root,
        } => {
            let config = load_config(config, root)?;
            run_process(&config, blobs, all).await
        }
        Commands::List { container, config, root } => {
            let config = load_config(config, root)?;
            let store = FsBlobStore::new(config.storage.root.clone());
            for name in store
                .list_blobs(&container)
                .await
                .with_context(|| format!("Failed to list container '{}'", container))?
            {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        #[cfg(feature = "api")]
        Commands::Serve { host, port, config } => {
            let config = load_config(config, None)?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            medallion::api::serve_with_config(host, port, config)
                .await
                .context("Server failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_process(config: &MedallionConfig, mut references: Vec<DocumentReference>, all: bool) -> Result<ExitCode> {
    let processor = BatchProcessor::from_config(config).context("Failed to set up batch processor")?;

    if all {
        let names = processor
            .store()
            .list_blobs(SOURCE_CONTAINER)
            .await
            .context("Failed to list the source container")?;
        tracing::debug!(count = names.len(), "Queued every blob in {}", SOURCE_CONTAINER);
        references.extend(names.into_iter().map(|name| DocumentReference::new(SOURCE_CONTAINER, name)));
    }

    let outcome = match processor.process_batch(&references).await {
        Ok(outcome) => outcome,
        Err(MedallionError::EmptyBatch) => {
            eprintln!("{}", MedallionError::EmptyBatch);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e).context("Batch processing failed"),
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("Failed to serialize batch outcome")?
    );

    Ok(if outcome.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Explicit file first, then discovery from the working directory, then defaults.
fn load_config(path: Option<PathBuf>, root: Option<PathBuf>) -> Result<MedallionConfig> {
    let mut config = match path {
        Some(path) => MedallionConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MedallionConfig::discover()
            .context("Failed to discover configuration")?
            .unwrap_or_default(),
    };

    if let Some(root) = root {
        config.storage.root = root;
    }

    Ok(config)
}

/// Parse `CONTAINER/NAME`. The name keeps any further slashes.
fn parse_reference(value: &str) -> Result<DocumentReference> {
    let Some((container, name)) = value.split_once('/') else {
        bail!("expected CONTAINER/NAME, got '{}'", value);
    };

    if container.is_empty() || name.is_empty() {
        bail!("expected CONTAINER/NAME, got '{}'", value);
    }

    Ok(DocumentReference::new(container, name))
}
