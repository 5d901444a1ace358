//! Suggestion and page types returned by the backend

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// A product suggestion, as snapshotted from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSuggestion {
    /// Product id
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label
    #[serde(default)]
    pub category: String,
    /// Unit price
    #[serde(default)]
    pub price: f64,
    /// Product image, if the backend has one
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductSuggestion {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            price: 0.0,
            image_url: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// The image URL if usable, otherwise `placeholder`.
    ///
    /// Usable means an absolute http(s) URL or a root-relative path.
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if is_usable_image(url) => url,
            _ => placeholder,
        }
    }
}

fn is_usable_image(url: &str) -> bool {
    if url.starts_with('/') && !url.starts_with("//") {
        return true;
    }
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// One page of suggestions for one query
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionPage {
    /// Suggestions in display order
    pub items: Vec<ProductSuggestion>,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Total pages available for the query (at least 1)
    pub total_pages: u32,
}

impl SuggestionPage {
    pub fn new(items: Vec<ProductSuggestion>, page_number: u32, total_pages: u32) -> Self {
        Self {
            items,
            page_number: page_number.max(1),
            total_pages: total_pages.max(1),
        }
    }

    /// An empty last page numbered `page_number`
    pub fn empty(page_number: u32) -> Self {
        Self::new(Vec::new(), page_number, page_number)
    }

    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_product() {
        let json = r#"{"_id": 42, "name": "Oat Milk", "category": "Dairy", "price": 3.49, "imageUrl": "https://cdn.example.com/oat.png"}"#;
        let product: ProductSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "42");
        assert_eq!(product.name, "Oat Milk");
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example.com/oat.png"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"id": "p1", "name": "Eggs"}"#;
        let product: ProductSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(product.category, "");
        assert_eq!(product.price, 0.0);
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_image_placeholder_fallback() {
        let placeholder = "/images/placeholder.png";

        let missing = ProductSuggestion::new("1", "Kale");
        assert_eq!(missing.image_or(placeholder), placeholder);

        let invalid = ProductSuggestion::new("2", "Tofu").with_image("not a url");
        assert_eq!(invalid.image_or(placeholder), placeholder);

        let blank = ProductSuggestion::new("3", "Bread").with_image("   ");
        assert_eq!(blank.image_or(placeholder), placeholder);

        let relative = ProductSuggestion::new("4", "Milk").with_image("/uploads/milk.jpg");
        assert_eq!(relative.image_or(placeholder), "/uploads/milk.jpg");

        let absolute = ProductSuggestion::new("5", "Rice").with_image("https://cdn.example.com/rice.jpg");
        assert_eq!(absolute.image_or(placeholder), "https://cdn.example.com/rice.jpg");
    }

    #[test]
    fn test_page_bounds_are_clamped() {
        let page = SuggestionPage::new(vec![], 0, 0);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more());
        assert!(SuggestionPage::new(vec![], 2, 3).has_more());
    }
}
