//! Content page API trait

use async_trait::async_trait;

use crate::client::models::{ContentPage, ContentPageInput};
use crate::error::Result;

#[async_trait]
pub trait ContentPageApi: Send + Sync {
    async fn list_pages(&self) -> Result<Vec<ContentPage>>;

    /// Get a page by slug, falling back to filtering the page list when
    /// the slug endpoint answers 404.
    async fn get_page_by_slug(&self, slug: &str) -> Result<ContentPage>;

    async fn create_page(&self, input: &ContentPageInput) -> Result<ContentPage>;

    async fn update_page(&self, id: &str, input: &ContentPageInput) -> Result<ContentPage>;

    async fn delete_page(&self, id: &str) -> Result<()>;

    fn invalidate_pages(&self) -> usize;
}
