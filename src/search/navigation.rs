//! Navigation hand-off

use crate::config::RouteSettings;

/// Transfers control outside the search engine (the host router)
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Expands the configured route templates
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
    routes: RouteSettings,
}

impl RouteBuilder {
    pub fn new(routes: RouteSettings) -> Self {
        Self { routes }
    }

    /// Search results path for `query`, store-scoped when a store is given
    pub fn search_path(&self, store_id: Option<&str>, query: &str) -> String {
        let template = match store_id {
            Some(_) => &self.routes.store_search,
            None => &self.routes.global_search,
        };
        expand(template, store_id, Some(query), None)
    }

    /// Product detail path, store-scoped when a store is given
    pub fn product_path(&self, store_id: Option<&str>, product_id: &str) -> String {
        let template = match store_id {
            Some(_) => &self.routes.store_product,
            None => &self.routes.global_product,
        };
        expand(template, store_id, None, Some(product_id))
    }
}

fn expand(
    template: &str,
    store_id: Option<&str>,
    query: Option<&str>,
    product_id: Option<&str>,
) -> String {
    let mut path = template.to_string();
    if let Some(store_id) = store_id {
        path = path.replace("{store_id}", &urlencoding::encode(store_id));
    }
    if let Some(query) = query {
        path = path.replace("{query}", &urlencoding::encode(query));
    }
    if let Some(product_id) = product_id {
        path = path.replace("{product_id}", &urlencoding::encode(product_id));
    }
    path
}
