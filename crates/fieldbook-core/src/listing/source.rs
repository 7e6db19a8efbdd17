//! Where list pages come from

use async_trait::async_trait;

use super::filter::FilterSpec;
use crate::entities::{Entity, Page};
use crate::error::Result;

/// Backend seam for a paged list; implemented by the REST client
#[async_trait]
pub trait PageSource<T: Entity>: Send + Sync {
    /// Fetch one page of the plain listing
    async fn fetch_page(&self, page: u32, per_page: u32, filter: &FilterSpec) -> Result<Page<T>>;

    /// Fetch the complete result set for a search term
    async fn search(&self, term: &str, filter: &FilterSpec) -> Result<Page<T>>;
}
