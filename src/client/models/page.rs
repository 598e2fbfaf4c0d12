//! Content page models (CMS pages such as "about" or "shipping")

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,

    pub slug: String,

    pub title: String,

    /// Page body (HTML or Markdown, as authored)
    #[serde(default)]
    pub content: String,

    #[serde(default = "default_published", alias = "isPublished")]
    pub published: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_published() -> bool {
    true
}

/// Body for creating or updating a content page (admin)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPageInput {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub published: bool,
}
