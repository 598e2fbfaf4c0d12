//! Content page and chat display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_datetime, truncate_string};
use storefront::client::models::{ChatMessage, ContentPage};

/// Content page display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PageDisplay {
    #[tabled(rename = "SLUG")]
    pub slug: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "PUBLISHED")]
    pub published: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,
}

impl From<ContentPage> for PageDisplay {
    fn from(page: ContentPage) -> Self {
        Self {
            updated: format_datetime(page.updated_at.as_ref()),
            slug: page.slug,
            title: page.title,
            published: if page.published { "\u{2713}" } else { "" }.to_string(),
        }
    }
}

/// Chat message display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ChatDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "FROM")]
    pub sender: String,

    #[tabled(rename = "MESSAGE")]
    pub message: String,

    #[tabled(rename = "AT")]
    pub at: String,
}

impl From<ChatMessage> for ChatDisplay {
    fn from(message: ChatMessage) -> Self {
        Self {
            at: format_datetime(message.timestamp.as_ref()),
            message: truncate_string(&message.message, 60),
            id: message.id,
            sender: message.sender,
        }
    }
}
