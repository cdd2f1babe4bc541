//! Option sets bundled with the workload.

use anyhow::{Context, Result};
use options_core::catalog::OptionCatalog;
use options_core::option::ProductRef;

const OPTION_SETS: &str = include_str!("../data/option-sets.json");

/// Parse the bundled catalog.
pub fn load() -> Result<OptionCatalog> {
    OptionCatalog::from_json(OPTION_SETS).context("Bundled option sets are invalid")
}

/// Product for `handle` with tags from a `tags=a,b` query string.
pub fn product_from_query(handle: &str, query: &str) -> ProductRef {
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix("tags="))
        .flat_map(|tags| tags.split(','))
        .map(|tag| tag.replace("%20", " ").replace('+', " "))
        .filter(|tag| !tag.trim().is_empty())
        .fold(ProductRef::new(handle), |product, tag| product.with_tag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use options_core::catalog::OptionSetSource;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = load().unwrap();
        assert_eq!(catalog.len(), 2);
        for set in catalog.sets() {
            assert!(!options_core::validate::validate(set).has_errors());
        }
    }

    #[test]
    fn test_tags_from_query() {
        let product = product_from_query("ring", "tags=engravable,gold+plated&x=1");
        assert_eq!(product.tags, vec!["engravable", "gold plated"]);

        let catalog = load().unwrap();
        let set = catalog.option_set_for(&product).unwrap();
        assert_eq!(set.id.as_str(), "engraving");

        let plain = product_from_query("mug", "");
        assert_eq!(catalog.option_set_for(&plain).unwrap().id.as_str(), "gift");
    }
}
