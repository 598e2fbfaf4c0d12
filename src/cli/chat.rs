//! Support chat command implementations

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{print_item, run_list_command};
use crate::models::display::ChatDisplay;
use storefront::Result;
use storefront::client::ChatApi;
use storefront::client::models::ChatMessage;

/// Run the chat send command
pub async fn send(opts: &GlobalOptions, message: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let sent = ctx.client.send_chat_message(message).await?;
    print_item(ChatDisplay::from(sent), ctx.format)
}

/// Run the chat poll command
pub async fn poll(opts: &GlobalOptions, since: Option<String>) -> Result<()> {
    run_list_command::<ChatMessage, ChatDisplay, _, _>(opts, "chat messages", |client| async move {
        client.chat_messages(since.as_deref()).await
    })
    .await
}
