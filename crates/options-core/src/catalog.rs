//! Option set supply.
//!
//! The admin side owns option sets; the storefront only reads them. This
//! module holds the read path: pick the option set that applies to a product.

use serde::Deserialize;

use crate::error::OptionsError;
use crate::ids::OptionSetId;
use crate::option::{OptionSet, ProductRef};

/// Read access to a shop's option sets.
pub trait OptionSetSource {
    /// The option set to render for `product`, if any.
    fn option_set_for(&self, product: &ProductRef) -> Option<&OptionSet>;
}

/// In-memory option sets, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionCatalog {
    sets: Vec<OptionSet>,
}

/// Accepted document shapes: a bare array or `{"optionSets": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Sets(Vec<OptionSet>),
    Wrapped {
        #[serde(rename = "optionSets")]
        option_sets: Vec<OptionSet>,
    },
}

impl OptionCatalog {
    pub fn new(sets: Vec<OptionSet>) -> Self {
        Self { sets }
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| OptionsError::InvalidDocument(e.to_string()))?;
        let sets = match document {
            CatalogDocument::Sets(sets) => sets,
            CatalogDocument::Wrapped { option_sets } => option_sets,
        };
        Ok(Self::new(sets))
    }

    /// Serialize back to the wrapped document shape.
    pub fn to_json(&self) -> Result<String, OptionsError> {
        let document = serde_json::json!({ "optionSets": self.sets });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// All option sets in catalog order.
    pub fn sets(&self) -> &[OptionSet] {
        &self.sets
    }

    /// Look up a set by id.
    pub fn get(&self, id: &OptionSetId) -> Option<&OptionSet> {
        self.sets.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl OptionSetSource for OptionCatalog {
    /// Tag-gated sets win over apply-to-all sets; within each group the
    /// first set in catalog order wins.
    fn option_set_for(&self, product: &ProductRef) -> Option<&OptionSet> {
        let enabled = || self.sets.iter().filter(|s| s.enabled);
        enabled()
            .find(|s| !s.apply_to_all && s.matches_tags(product))
            .or_else(|| enabled().find(|s| s.apply_to_all))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "optionSets": [
            {"id": "all", "name": "Everything", "applyToAll": true, "options": []},
            {"id": "rings", "name": "Rings", "productTags": ["ring"], "options": []},
            {"id": "off", "name": "Disabled", "productTags": ["mug"], "enabled": false, "options": []}
        ]
    }"#;

    #[test]
    fn test_from_json_wrapped_and_bare() {
        let catalog = OptionCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let bare = OptionCatalog::from_json(r#"[{"id": "x", "name": "X"}]"#).unwrap();
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_tag_match_beats_apply_to_all() {
        let catalog = OptionCatalog::from_json(CATALOG).unwrap();
        let ring = ProductRef::new("gold-ring").with_tag("Ring");
        assert_eq!(catalog.option_set_for(&ring).unwrap().id.as_str(), "rings");
    }

    #[test]
    fn test_falls_back_to_apply_to_all() {
        let catalog = OptionCatalog::from_json(CATALOG).unwrap();
        let mug = ProductRef::new("mug").with_tag("mug");
        assert_eq!(catalog.option_set_for(&mug).unwrap().id.as_str(), "all");
    }

    #[test]
    fn test_no_applicable_set() {
        let catalog = OptionCatalog::from_json(r#"[{"id": "t", "name": "T", "productTags": ["x"]}]"#)
            .unwrap();
        assert!(catalog.option_set_for(&ProductRef::new("p")).is_none());
    }

    #[test]
    fn test_malformed_document() {
        let err = OptionCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, OptionsError::InvalidDocument(_)));
    }
}
