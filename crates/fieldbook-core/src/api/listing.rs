//! List and search endpoints

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use tracing::info;

use super::core::ApiClient;
use crate::entities::{decode_list, Entity, EntityKind, Page};
use crate::error::Result;
use crate::listing::{FilterSpec, PageSource};

/// Path of the paginated listing endpoint
pub(crate) fn list_path(kind: EntityKind) -> String {
    format!("{}/list", kind.path())
}

pub(crate) fn search_path(kind: EntityKind) -> String {
    format!("{}/search", kind.path())
}

impl ApiClient {
    /// `GET /{entity}/list?page=..&per_page=..` plus filter parameters
    pub async fn list_page<T: Entity>(
        &self,
        page: u32,
        per_page: u32,
        filter: &FilterSpec,
    ) -> Result<Page<T>> {
        let page = page.max(1);
        let request = self
            .request(Method::GET, &list_path(T::KIND))
            .query(&[("page", page), ("per_page", per_page)])
            .query(&filter.query_pairs());

        let body = self.send_json(request).await?;
        let result = decode_list::<T>(body, page)?;
        info!(
            "Fetched {} page {}: {} items (total {}, has_more {})",
            T::KIND,
            result.page,
            result.items.len(),
            result.total,
            result.has_more
        );
        Ok(result)
    }

    /// `GET /{entity}/search?q=..&page=1&per_page=..` plus filter parameters
    pub(crate) fn search_request(
        &self,
        kind: EntityKind,
        term: &str,
        filter: &FilterSpec,
    ) -> RequestBuilder {
        self.request(Method::GET, &search_path(kind))
            .query(&[("q", term)])
            .query(&[("page", 1), ("per_page", kind.search_page_size())])
            .query(&filter.query_pairs())
    }

    /// One-shot search; clients fetch up to 500 rows, the others 100
    pub async fn search_entities<T: Entity>(
        &self,
        term: &str,
        filter: &FilterSpec,
    ) -> Result<Page<T>> {
        let request = self.search_request(T::KIND, term, filter);

        let body = self.send_json(request).await?;
        let result = decode_list::<T>(body, 1)?;
        info!(
            "Search {} for '{}': {} results",
            T::KIND,
            term,
            result.items.len()
        );
        Ok(result)
    }
}

#[async_trait]
impl<T: Entity> PageSource<T> for ApiClient {
    async fn fetch_page(&self, page: u32, per_page: u32, filter: &FilterSpec) -> Result<Page<T>> {
        self.list_page(page, per_page, filter).await
    }

    async fn search(&self, term: &str, filter: &FilterSpec) -> Result<Page<T>> {
        self.search_entities(term, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClientConfig;
    use crate::auth::SessionStore;
    use crate::listing::StatusFilter;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(list_path(EntityKind::Products), "products/list");
        assert_eq!(search_path(EntityKind::Reports), "visit-reports/search");
    }

    #[test]
    fn test_list_query_includes_filter() {
        let client = ApiClient::new(ApiClientConfig::default(), SessionStore::in_memory(None));
        let filter = FilterSpec::with_status(StatusFilter::Inactive)
            .region("North")
            .salesman("7");

        let request = client
            .request(Method::GET, &list_path(EntityKind::Clients))
            .query(&[("page", 2u32), ("per_page", 500u32)])
            .query(&filter.query_pairs())
            .build()
            .unwrap();

        assert_eq!(
            request.url().query(),
            Some("page=2&per_page=500&show_all=true&region=North&salesman=7")
        );
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_search_page_size_follows_kind() {
        let client = ApiClient::new(ApiClientConfig::default(), SessionStore::in_memory(None));

        let request = client
            .search_request(EntityKind::Clients, "noor", &FilterSpec::default())
            .build()
            .unwrap();
        assert_eq!(request.url().path(), "/api/clients/search");
        assert_eq!(request.url().query(), Some("q=noor&page=1&per_page=500"));

        let filter = FilterSpec::with_status(StatusFilter::All);
        let request = client
            .search_request(EntityKind::Products, "oil", &filter)
            .build()
            .unwrap();
        assert_eq!(
            request.url().query(),
            Some("q=oil&page=1&per_page=100&show_all=true")
        );

        let request = client
            .search_request(EntityKind::Reports, "al noor", &FilterSpec::default())
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("q=al+noor&page=1&per_page=100"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_fetch_error() {
        let config = ApiClientConfig::default().with_base_url("http://127.0.0.1:9/api");
        let client = ApiClient::new(config, SessionStore::in_memory(None));

        let err = client
            .list_page::<crate::entities::Product>(1, 20, &FilterSpec::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), None);
        assert!(!err.is_auth());
    }
}
