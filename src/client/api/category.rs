//! Category API trait

use async_trait::async_trait;

use crate::client::models::{Category, CategoryInput};
use crate::error::Result;

#[async_trait]
pub trait CategoryApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: &str) -> Result<Category>;

    async fn create_category(&self, input: &CategoryInput) -> Result<Category>;

    async fn update_category(&self, id: &str, input: &CategoryInput) -> Result<Category>;

    async fn delete_category(&self, id: &str) -> Result<()>;

    fn invalidate_categories(&self) -> usize;
}
