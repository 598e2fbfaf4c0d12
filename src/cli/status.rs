//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::resolve_path;
use storefront::Result;
use storefront::config::Config;

/// Show the resolved configuration without contacting the API
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Storefront Configuration Status".bold());

    let config_path = resolve_path(opts.config_ref())?;
    let exists = config_path.exists();
    let config = Config::load_or_default(&config_path)?;

    if exists {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not created yet, using defaults)".dimmed()
        );
    }
    println!();

    let api_url = opts.api_url.as_deref().unwrap_or(&config.api_base_url);
    println!("{} API: {}", "✓".green(), api_url.cyan());

    let has_token = opts.token.is_some() || config.auth_context().token.is_some();
    if has_token {
        println!("{} Signed in (bearer token configured)", "✓".green());
    } else {
        println!("{} Browsing as guest", "○".dimmed());
    }

    match config.session_id {
        Some(ref id) => println!("{} Guest session: {}", "✓".green(), id),
        None => println!(
            "{} No guest session yet (created on first API command)",
            "○".dimmed()
        ),
    }

    let timeout = opts.timeout.unwrap_or(config.timeout_secs);
    println!("{} Timeout: {}s", "○".dimmed(), timeout);
    println!(
        "{} Slow endpoint threshold: {}ms",
        "○".dimmed(),
        config.slow_threshold_ms
    );

    if opts.no_cache {
        println!("{} Response cache disabled", "⚠".yellow());
    } else {
        let ttl = &config.cache_ttl;
        println!(
            "{} Cache TTLs: products {}s, categories {}s, orders {}s, other {}s",
            "○".dimmed(),
            ttl.products.as_secs(),
            ttl.categories.as_secs(),
            ttl.orders.as_secs(),
            ttl.fallback.as_secs()
        );
    }

    println!();
    Ok(())
}
