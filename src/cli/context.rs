//! Command execution context
//!
//! Loads configuration, applies CLI overrides and builds the shared client
//! once, so command handlers only deal with their own resource.

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use storefront::config::Config;
use storefront::{Result, StorefrontClient};

/// Context for command execution containing config, client, and output format.
pub struct CommandContext {
    /// Resolved configuration (file merged with CLI overrides)
    pub config: Config,
    /// Where the configuration file lives
    pub config_path: PathBuf,
    /// API client, Arc-wrapped for concurrent requests
    pub client: Arc<StorefrontClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A guest session id is generated and saved on first use so cart and
    /// wishlist calls keep hitting the same guest cart across runs.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = resolve_path(opts.config_ref())?;
        let mut config = Config::load_or_default(&config_path)?;

        if config.ensure_session_id() {
            debug!("Generated guest session id");
            // Non-fatal: the id is still used for this run
            if let Err(e) = config.save_to(&config_path) {
                warn!("Could not save session id to {}: {}", config_path.display(), e);
            }
        }

        let config = apply_overrides(config, opts);
        config.validate()?;

        let client = StorefrontClient::from_config(&config)?.with_cache(!opts.no_cache);

        Ok(Self {
            config,
            config_path,
            client: Arc::new(client),
            format: opts.format,
        })
    }
}

/// Config file location: `--config` / `STOREFRONT_CONFIG`, else the default.
pub fn resolve_path(config_path: Option<&str>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => Config::default_path(),
    }
}

/// Layer CLI flags over file values. Overrides are never written back.
fn apply_overrides(mut config: Config, opts: &GlobalOptions) -> Config {
    if let Some(ref url) = opts.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(ref token) = opts.token {
        config.auth_token = Some(token.clone());
    }
    if let Some(timeout) = opts.timeout {
        config.timeout_secs = timeout;
    }
    config
}
