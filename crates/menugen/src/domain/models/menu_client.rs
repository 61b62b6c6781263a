use async_trait::async_trait;

use super::{Cuisine, Menu, PlaylistRef};
use crate::errors::MenuError;

#[async_trait]
pub trait MenuClient: Send + Sync {
    async fn fetch_recipes(&self, cuisine: &Cuisine) -> Result<Menu, MenuError>;
    async fn fetch_playlist(&self, theme: &Cuisine) -> Result<PlaylistRef, MenuError>;
}
