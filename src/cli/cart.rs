//! Cart command implementations
//!
//! Every mutation returns the updated cart, which is printed directly. The
//! cached `GET /cart` entry is dropped afterwards so the next `cart show`
//! reflects the change.

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::models::display::{CartItemDisplay, format_money};
use crate::output::{Formattable, json};
use storefront::Result;
use storefront::client::CartApi;
use storefront::client::models::Cart;

/// Run the cart show command
pub async fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let cart = ctx.client.get_cart().await?;
    print_cart(cart, ctx.format)
}

/// Run the cart add command
pub async fn add(opts: &GlobalOptions, product_id: &str, qty: u32) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let cart = ctx.client.add_to_cart(product_id, qty).await?;
    ctx.client.invalidate_cart();

    if ctx.format == OutputFormat::Table {
        println!("{} Added {} x {}", "✓".green(), qty, product_id);
    }
    print_cart(cart, ctx.format)
}

/// Run the cart update command
pub async fn update(opts: &GlobalOptions, item_id: &str, qty: u32) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let cart = ctx.client.update_cart_item(item_id, qty).await?;
    ctx.client.invalidate_cart();
    print_cart(cart, ctx.format)
}

/// Run the cart remove command
pub async fn remove(opts: &GlobalOptions, item_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let cart = ctx.client.remove_cart_item(item_id).await?;
    ctx.client.invalidate_cart();
    print_cart(cart, ctx.format)
}

/// Run the cart clear command
pub async fn clear(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    ctx.client.clear_cart().await?;
    let dropped = ctx.client.invalidate_cart();
    debug!("Dropped {} cached cart entries", dropped);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&Cart::default())?),
        OutputFormat::Table => println!("{} Cart cleared", "✓".green()),
    }
    Ok(())
}

fn print_cart(cart: Cart, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", json::format_json(&cart)?);
        return Ok(());
    }

    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    let count = cart.item_count();
    let total = cart.total;
    let lines: Vec<CartItemDisplay> = cart.items.into_iter().map(CartItemDisplay::from).collect();
    lines.print(format)?;
    println!(
        "{} item(s), total {}",
        count,
        format_money(total).bold()
    );
    Ok(())
}
