//! Wishlist command implementations

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, OutputFormat};
use crate::models::display::WishlistDisplay;
use crate::output::Formattable;
use storefront::Result;
use storefront::client::WishlistApi;
use storefront::client::models::WishlistItem;

/// Run the wishlist show command
pub async fn show(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<WishlistItem, WishlistDisplay, _, _>(opts, "wishlist", |client| async move {
        client.get_wishlist().await
    })
    .await
}

/// Run the wishlist add command
pub async fn add(opts: &GlobalOptions, product_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let items = ctx.client.add_to_wishlist(product_id).await?;
    ctx.client.invalidate_wishlist();

    if ctx.format == OutputFormat::Table {
        println!("{} Saved {}", "✓".green(), product_id);
    }
    print_items(items, ctx.format)
}

/// Run the wishlist remove command
pub async fn remove(opts: &GlobalOptions, product_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let items = ctx.client.remove_from_wishlist(product_id).await?;
    ctx.client.invalidate_wishlist();

    if ctx.format == OutputFormat::Table {
        println!("{} Removed {}", "✓".green(), product_id);
    }
    print_items(items, ctx.format)
}

fn print_items(items: Vec<WishlistItem>, format: OutputFormat) -> Result<()> {
    let display: Vec<WishlistDisplay> = items.into_iter().map(WishlistDisplay::from).collect();
    display.print(format)
}
