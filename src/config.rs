use crate::services::annotation_store::Collections;
use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub images_collection: String,
    pub labels_collection: String,
    pub storage_dir: String,
    pub max_upload_bytes: usize,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Image annotation store API")]
pub struct Args {
    /// Host to bind to (overrides ANNOTATION_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides ANNOTATION_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Store connection URL (overrides ANNOTATION_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Collection holding image records (overrides ANNOTATION_IMAGES_COLLECTION)
    #[arg(long)]
    pub images_collection: Option<String>,

    /// Collection holding labels (overrides ANNOTATION_LABELS_COLLECTION)
    #[arg(long)]
    pub labels_collection: Option<String>,

    /// Directory where uploaded images are written (overrides ANNOTATION_STORAGE_DIR)
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Largest accepted upload body in bytes (overrides ANNOTATION_MAX_UPLOAD_BYTES)
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::resolve(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// Merge CLI args over values looked up by `var`, falling back to defaults.
    pub fn resolve<F>(args: Args, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let text = |key: &str, default: &str| -> Result<String> {
            match var(key) {
                Ok(value) => Ok(value),
                Err(env::VarError::NotPresent) => Ok(default.to_string()),
                Err(err) => Err(err).with_context(|| format!("reading {}", key)),
            }
        };

        // --- Environment fallback ---
        let env_host = text("ANNOTATION_HOST", "127.0.0.1")?;
        let env_port = text("ANNOTATION_PORT", "8080")?;
        let env_db = text("ANNOTATION_DATABASE_URL", "sqlite://./data/annotationdb.db")?;
        let env_images = text("ANNOTATION_IMAGES_COLLECTION", "annotations")?;
        let env_labels = text("ANNOTATION_LABELS_COLLECTION", "labels")?;
        let env_storage = text("ANNOTATION_STORAGE_DIR", "./data/uploads")?;
        let env_max_upload = text("ANNOTATION_MAX_UPLOAD_BYTES", "52428800")?;

        // --- Merge ---
        let port = match args.port {
            Some(port) => port,
            None => env_port
                .parse::<u16>()
                .with_context(|| format!("parsing ANNOTATION_PORT value `{}`", env_port))?,
        };
        let max_upload_bytes = match args.max_upload_bytes {
            Some(bytes) => bytes,
            None => env_max_upload.parse::<usize>().with_context(|| {
                format!("parsing ANNOTATION_MAX_UPLOAD_BYTES value `{}`", env_max_upload)
            })?,
        };

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port,
            database_url: args.database_url.unwrap_or(env_db),
            images_collection: args.images_collection.unwrap_or(env_images),
            labels_collection: args.labels_collection.unwrap_or(env_labels),
            storage_dir: args.storage_dir.unwrap_or(env_storage),
            max_upload_bytes,
        };
        cfg.collections()?;
        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn collections(&self) -> Result<Collections> {
        Collections::new(&self.images_collection, &self.labels_collection)
            .context("invalid collection configuration")
    }
}
