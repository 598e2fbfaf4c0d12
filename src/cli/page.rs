//! Content page command implementations

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, OutputFormat};
use crate::models::display::PageDisplay;
use crate::output::json;
use storefront::Result;
use storefront::client::ContentPageApi;
use storefront::client::models::ContentPage;

/// Run the page list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<ContentPage, PageDisplay, _, _>(opts, "pages", |client| async move {
        client.list_pages().await
    })
    .await
}

/// Run the page get command, printing the page body
pub async fn get(opts: &GlobalOptions, slug: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let page = ctx.client.get_page_by_slug(slug).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&page)?),
        OutputFormat::Table => {
            println!("{}", page.title.bold());
            println!("{}", "─".repeat(page.title.chars().count()).dimmed());
            println!("{}", page.content);
        }
    }
    Ok(())
}
