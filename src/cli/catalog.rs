//! Product and category command implementations

use colored::Colorize;
use log::debug;

use crate::cli::args::{GlobalOptions, PaginationArgs};
use crate::cli::handlers::{print_item, run_list_command};
use crate::cli::{CommandContext, OutputFormat};
use crate::models::display::{CategoryDisplay, ProductDisplay, format_money};
use crate::output::{Formattable, json};
use storefront::client::models::{Category, Product};
use storefront::client::{CategoryApi, ProductApi, ProductQuery};
use storefront::Result;

/// Concurrent page requests for `product list --all`
const MAX_CONCURRENT_PAGES: usize = 4;

/// Run the product list command
pub async fn list_products(
    opts: &GlobalOptions,
    category: Option<String>,
    search: Option<String>,
    all: bool,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let mut query = ProductQuery::new().pagination(pagination.to_params());
    if let Some(category) = category {
        query = query.category(category);
    }
    if let Some(search) = search {
        query = query.search(search);
    }

    let products = if all {
        ctx.client
            .list_all_products(&query, MAX_CONCURRENT_PAGES)
            .await?
    } else {
        ctx.client.list_products(&query).await?
    };
    debug!("Fetched {} products", products.len());

    let display: Vec<ProductDisplay> = products.iter().map(ProductDisplay::from).collect();
    display.print(ctx.format)
}

/// Run the product get command
pub async fn get_product(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let product = ctx.client.get_product_by_id(id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&product)?),
        OutputFormat::Table => print_product_detail(&product),
    }
    Ok(())
}

fn print_product_detail(product: &Product) {
    println!("{} {}", product.name.bold(), format!("({})", product.id).dimmed());

    let mut price = format_money(product.price).green().to_string();
    if let (Some(original), Some(pct)) = (product.original_price, product.discount_percent()) {
        price = format!(
            "{} {} {}",
            price,
            format_money(original).strikethrough(),
            format!("-{}%", pct).yellow()
        );
    }
    println!("Price:    {}", price);

    if let Some(ref category) = product.category {
        println!("Category: {}", category);
    }

    let stock = match product.stock {
        Some(0) => "out of stock".red().to_string(),
        Some(n) => format!("{} in stock", n),
        None => "available".to_string(),
    };
    println!("Stock:    {}", stock);

    if let Some(rating) = product.rating {
        println!("Rating:   {:.1}/5", rating);
    }

    if let Some(ref description) = product.description {
        println!();
        println!("{}", description);
    }
}

/// Run the product featured command
pub async fn featured_products(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Product, ProductDisplay, _, _>(opts, "featured products", |client| async move {
        client.featured_products().await
    })
    .await
}

/// Run the category list command
pub async fn list_categories(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Category, CategoryDisplay, _, _>(opts, "categories", |client| async move {
        client.list_categories().await
    })
    .await
}

/// Run the category get command
pub async fn get_category(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let category = ctx.client.get_category(id).await?;
    print_item(CategoryDisplay::from(category), ctx.format)
}
