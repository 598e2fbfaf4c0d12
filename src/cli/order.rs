//! Order command implementations

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{print_item, run_list_command};
use crate::models::display::OrderDisplay;
use storefront::Result;
use storefront::client::OrderApi;
use storefront::client::models::Order;

/// Run the order list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Order, OrderDisplay, _, _>(opts, "orders", |client| async move {
        client.my_orders().await
    })
    .await
}

/// Run the order get command
pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let order = ctx.client.get_order(id).await?;
    print_item(OrderDisplay::from(order), ctx.format)
}
