//! Option sets and the products they apply to.

use serde::{Deserialize, Serialize};

use super::ProductOption;
use crate::ids::{OptionId, OptionSetId};

/// The product an option set is being looked up for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRef {
    /// Product handle (URL slug).
    #[serde(default)]
    pub handle: String,
    /// Product tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProductRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            tags: Vec::new(),
        }
    }

    /// Add a tag to this product.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Tag membership, trimmed and case-insensitive like storefront tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

/// An ordered collection of options, scoped to a shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionSet {
    /// Unique option set identifier.
    pub id: OptionSetId,
    /// Merchant-facing name.
    pub name: String,
    /// Owning shop domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<String>,
    /// Applies to every product when set.
    #[serde(default)]
    pub apply_to_all: bool,
    /// Applies to products carrying any of these tags.
    #[serde(default)]
    pub product_tags: Vec<String>,
    /// Disabled sets are never selected.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Options in display order.
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

fn default_enabled() -> bool {
    true
}

impl OptionSet {
    /// Create an empty set applied to all products.
    pub fn new(id: impl Into<OptionSetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shop: None,
            apply_to_all: true,
            product_tags: Vec::new(),
            enabled: true,
            options: Vec::new(),
        }
    }

    /// Restrict the set to products carrying `tag`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.apply_to_all = false;
        self.product_tags.push(tag.into());
        self
    }

    /// Append an option.
    pub fn with_option(mut self, option: ProductOption) -> Self {
        self.options.push(option);
        self
    }

    /// Whether any of this set's tags is on the product.
    pub fn matches_tags(&self, product: &ProductRef) -> bool {
        self.product_tags.iter().any(|tag| product.has_tag(tag))
    }

    /// Whether the set applies to the product at all.
    pub fn applies_to(&self, product: &ProductRef) -> bool {
        self.enabled && (self.apply_to_all || self.matches_tags(product))
    }

    /// Look up an option by id.
    pub fn option(&self, id: &OptionId) -> Option<&ProductOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Look up an option by its form field name.
    pub fn option_named(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionKind;

    #[test]
    fn test_tag_matching_is_case_insensitive() {
        let set = OptionSet::new("set-1", "Engraving").with_tag("Engravable");
        let product = ProductRef::new("ring").with_tag(" engravable ");
        assert!(set.applies_to(&product));
        assert!(!set.applies_to(&ProductRef::new("mug")));
    }

    #[test]
    fn test_disabled_set_never_applies() {
        let mut set = OptionSet::new("set-1", "All");
        set.enabled = false;
        assert!(!set.applies_to(&ProductRef::new("anything")));
    }

    #[test]
    fn test_deserialize_defaults() {
        let set: OptionSet = serde_json::from_str(
            r#"{"id": "s", "name": "Tagged", "productTags": ["gift"], "options": []}"#,
        )
        .unwrap();
        assert!(set.enabled);
        assert!(!set.apply_to_all);
        assert_eq!(set.product_tags, vec!["gift".to_string()]);
    }

    #[test]
    fn test_option_lookup() {
        let set = OptionSet::new("s", "Set")
            .with_option(ProductOption::new("a", "Note", OptionKind::Text { price: None }));
        assert!(set.option(&OptionId::new("a")).is_some());
        assert!(set.option_named("Note").is_some());
        assert!(set.option_named("note").is_none());
    }
}
