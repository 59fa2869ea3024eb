//! SEO metadata for collection pages.

use serde::Serialize;

use crate::storefront::Collection;

/// Maximum length of a meta description, in characters.
const MAX_DESCRIPTION_CHARS: usize = 155;

/// Page-level SEO metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl SeoMeta {
    /// Derive metadata from a collection, preferring its SEO overrides.
    pub fn for_collection(collection: &Collection, site_url: &str, path: &str) -> Self {
        let title = non_blank(collection.seo.title.as_deref())
            .unwrap_or(&collection.title)
            .to_string();

        let description = non_blank(collection.seo.description.as_deref())
            .unwrap_or(&collection.description);

        Self {
            title,
            description: truncate_chars(description.trim(), MAX_DESCRIPTION_CHARS),
            url: format!("{}{}", site_url.trim_end_matches('/'), path),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::storefront::{CollectionSeo, ProductConnection};

    fn collection(seo: CollectionSeo, description: &str) -> Collection {
        Collection {
            id: "1".to_string(),
            handle: "shirts".to_string(),
            title: "Shirts".to_string(),
            description: description.to_string(),
            seo,
            image: None,
            products: ProductConnection::default(),
        }
    }

    #[test]
    fn seo_overrides_win() {
        let c = collection(
            CollectionSeo {
                title: Some("Buy Shirts".to_string()),
                description: Some("Our best shirts".to_string()),
            },
            "Plain description",
        );
        let seo = SeoMeta::for_collection(&c, "https://shop.example.com/", "/collections/shirts");
        assert_eq!(seo.title, "Buy Shirts");
        assert_eq!(seo.description, "Our best shirts");
        assert_eq!(seo.url, "https://shop.example.com/collections/shirts");
    }

    #[test]
    fn blank_overrides_fall_back_to_collection() {
        let c = collection(
            CollectionSeo {
                title: Some("  ".to_string()),
                description: None,
            },
            "Plain description",
        );
        let seo = SeoMeta::for_collection(&c, "https://shop.example.com", "/collections/shirts");
        assert_eq!(seo.title, "Shirts");
        assert_eq!(seo.description, "Plain description");
    }

    #[test]
    fn long_descriptions_are_truncated_by_chars() {
        let c = collection(CollectionSeo::default(), &"ü".repeat(200));
        let seo = SeoMeta::for_collection(&c, "", "/collections/shirts");
        assert_eq!(seo.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }
}
