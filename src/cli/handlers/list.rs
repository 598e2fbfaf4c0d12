//! Generic list command handler
//!
//! Most read commands follow the same flow:
//! 1. Create command context
//! 2. Fetch data through the shared client
//! 3. Convert to display type
//! 4. Print output

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::output::{Formattable, json, table};
use storefront::{Result, StorefrontClient};

/// Run a standard list command with the common fetch → display → print pattern.
///
/// # Example
///
/// ```ignore
/// run_list_command::<Category, CategoryDisplay, _, _>(opts, "categories", |client| async move {
///     client.list_categories().await
/// })
/// .await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(Arc<StorefrontClient>) -> Fut,
{
    let ctx = CommandContext::new(opts).await?;

    debug!("Fetching {}", resource_name);
    let items = fetcher(ctx.client.clone()).await?;
    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(ctx.format)
}

/// Print a single record as a one-row table or as a JSON object.
pub fn print_item<D: Tabled + Serialize>(item: D, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table::format_table(&[item])),
        OutputFormat::Json => println!("{}", json::format_json(&item)?),
    }
    Ok(())
}
