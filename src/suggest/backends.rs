//! Suggestion backend implementations

use crate::config::ApiSettings;
use crate::error::FetchError;
use crate::network::{ApiRequest, HttpClient};
use crate::results::{ProductSuggestion, SuggestionPage};
use crate::scope::ScopeDescriptor;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Precomputed lists shown while the query is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdleListKind {
    Popular,
    Recommended,
    Featured,
}

impl IdleListKind {
    pub const ALL: [IdleListKind; 3] = [
        IdleListKind::Popular,
        IdleListKind::Recommended,
        IdleListKind::Featured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdleListKind::Popular => "popular",
            IdleListKind::Recommended => "recommended",
            IdleListKind::Featured => "featured",
        }
    }
}

impl fmt::Display for IdleListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for suggestion backends
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Fetch one page of suggestions for `query` within `scope`
    async fn fetch_page(
        &self,
        query: &str,
        scope: &ScopeDescriptor,
        page: u32,
        page_size: u32,
    ) -> Result<SuggestionPage, FetchError>;

    /// Fetch one idle list for an optional store
    async fn fetch_idle_list(
        &self,
        kind: IdleListKind,
        store_id: Option<&str>,
    ) -> Result<Vec<ProductSuggestion>, FetchError>;
}

/// Response envelope shared by the storefront endpoints:
/// `{"success": bool, "data": [...], "pagination": {"totalPages": n}}`
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<ProductSuggestion>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    #[serde(default)]
    total_pages: u32,
}

/// Storefront REST catalog
pub struct HttpCatalog {
    client: HttpClient,
    api: ApiSettings,
}

impl HttpCatalog {
    pub fn new(client: HttpClient, api: ApiSettings) -> Self {
        Self { client, api }
    }

    /// Build the suggestion request; the endpoint depends only on the scope kind
    pub fn page_request(
        &self,
        query: &str,
        scope: &ScopeDescriptor,
        page: u32,
        page_size: u32,
    ) -> ApiRequest {
        let request = match scope {
            ScopeDescriptor::Store { store_id } => {
                ApiRequest::get(self.api.url(&self.api.store_search_path))
                    .param("q", query)
                    .param("storeId", store_id)
            }
            ScopeDescriptor::CrossStore { .. } => {
                ApiRequest::get(self.api.url(&self.api.cross_store_search_path))
                    .param("q", query)
                    .param("storeIds", scope.joined_store_ids())
            }
        };

        request.param("page", page).param("limit", page_size)
    }

    /// Build an idle-list request
    pub fn idle_request(&self, kind: IdleListKind, store_id: Option<&str>) -> ApiRequest {
        let path = match kind {
            IdleListKind::Popular => &self.api.popular_path,
            IdleListKind::Recommended => &self.api.recommended_path,
            IdleListKind::Featured => &self.api.featured_path,
        };

        let request = ApiRequest::get(self.api.url(path));
        match store_id {
            Some(id) => request.param("storeId", id),
            None => request,
        }
    }

    async fn envelope(&self, request: ApiRequest) -> Result<Envelope, FetchError> {
        let response = self.client.execute(request).await?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        let envelope: Envelope = response.json()?;
        if !envelope.success {
            return Err(FetchError::Unsuccessful);
        }

        Ok(envelope)
    }
}

#[async_trait]
impl SuggestionSource for HttpCatalog {
    fn name(&self) -> &str {
        "storefront-api"
    }

    async fn fetch_page(
        &self,
        query: &str,
        scope: &ScopeDescriptor,
        page: u32,
        page_size: u32,
    ) -> Result<SuggestionPage, FetchError> {
        let request = self.page_request(query, scope, page, page_size);
        let envelope = self.envelope(request).await?;

        let total_pages = envelope
            .pagination
            .map(|p| p.total_pages)
            .unwrap_or(1);

        Ok(SuggestionPage::new(envelope.data, page, total_pages))
    }

    async fn fetch_idle_list(
        &self,
        kind: IdleListKind,
        store_id: Option<&str>,
    ) -> Result<Vec<ProductSuggestion>, FetchError> {
        let request = self.idle_request(kind, store_id);
        Ok(self.envelope(request).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutgoingSettings;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog(base_url: &str) -> HttpCatalog {
        let api = ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        };
        HttpCatalog::new(
            HttpClient::with_settings(&OutgoingSettings::default()).unwrap(),
            api,
        )
    }

    #[test]
    fn test_endpoint_follows_scope_kind() {
        let catalog = catalog("http://shop.local");

        let store = catalog.page_request("milk", &ScopeDescriptor::store("S1"), 1, 10);
        assert_eq!(store.url, "http://shop.local/api/products/search");
        assert_eq!(store.param_value("storeId"), Some("S1"));
        assert_eq!(store.param_value("storeIds"), None);

        let cross = catalog.page_request("milk", &ScopeDescriptor::cross_store(["S2", "S1"]), 3, 10);
        assert_eq!(cross.url, "http://shop.local/api/products/search/multi-store");
        assert_eq!(cross.param_value("storeIds"), Some("S1,S2"));
        assert_eq!(cross.param_value("page"), Some("3"));
        assert_eq!(cross.param_value("limit"), Some("10"));
    }

    #[test]
    fn test_idle_request_store_param() {
        let catalog = catalog("http://shop.local");

        let scoped = catalog.idle_request(IdleListKind::Featured, Some("S1"));
        assert_eq!(scoped.url, "http://shop.local/api/products/featured");
        assert_eq!(scoped.param_value("storeId"), Some("S1"));

        let global = catalog.idle_request(IdleListKind::Popular, None);
        assert!(global.params.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/search"))
            .and(query_param("q", "milk"))
            .and(query_param("storeId", "S1"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    {"_id": "p1", "name": "Whole Milk", "category": "Dairy", "price": 1.99},
                    {"_id": "p2", "name": "Oat Milk", "category": "Dairy", "price": 3.49, "imageUrl": "/img/oat.png"}
                ],
                "pagination": {"totalPages": 4}
            })))
            .mount(&server)
            .await;

        let page = catalog(&server.uri())
            .fetch_page("milk", &ScopeDescriptor::store("S1"), 2, 10)
            .await
            .unwrap();

        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].image_url.as_deref(), Some("/img/oat.png"));
    }

    #[tokio::test]
    async fn test_fetch_page_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/search/multi-store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let catalog = catalog(&server.uri());

        let status = catalog
            .fetch_page("milk", &ScopeDescriptor::store("S1"), 1, 10)
            .await;
        assert!(matches!(status, Err(FetchError::Status(500))));

        let unsuccessful = catalog
            .fetch_page("milk", &ScopeDescriptor::cross_store(["S1"]), 1, 10)
            .await;
        assert!(matches!(unsuccessful, Err(FetchError::Unsuccessful)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/popular"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = catalog(&server.uri())
            .fetch_idle_list(IdleListKind::Popular, None)
            .await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
