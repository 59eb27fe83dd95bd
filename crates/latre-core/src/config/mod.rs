use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, ENV_PREFIX, PACKAGE_NAME, STORE_DIR_NAME};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one `.vcf` file per stored contact.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Upper bound on candidate files read concurrently.
    pub max_parallel_reads: usize,
    /// Probe the store once for the whole batch and add in one operation
    /// when nothing collides.
    pub batch_add: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub inline_photos: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// ## Summary
/// Returns the default store directory: `<user data dir>/latre/contacts`,
/// falling back to the working directory when no data dir is known.
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PACKAGE_NAME)
        .join(STORE_DIR_NAME)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `latre.toml` file and
    /// `LATRE__*` environment variables, in increasing precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default(
                "store.path",
                default_store_path().to_string_lossy().into_owned(),
            )?
            .set_default("import.max_parallel_reads", 5)?
            .set_default("import.batch_add", true)?
            .set_default("export.inline_photos", true)?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env vars override the file
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    if settings.import.max_parallel_reads == 0 {
        anyhow::bail!(crate::error::CoreError::ConfigError(
            "import.max_parallel_reads must be at least 1".to_string()
        ));
    }

    tracing::debug!(store = %settings.store.path.display(), "Configuration resolved");
    Ok(settings)
}
