//! Product option domain types and logic.
//!
//! This crate provides the storefront side of custom product options:
//!
//! - **Option model**: options, values, option sets and the products they apply to
//! - **Catalog**: picking the option set for a product
//! - **Visibility**: radio-driven conditional display
//! - **Surcharges**: turning selections into an additional price
//! - **Properties**: cart line properties and the reserved bookkeeping keys
//! - **Validation**: authoring-time checks
//!
//! # Example
//!
//! ```rust,ignore
//! use options_core::prelude::*;
//!
//! let catalog = OptionCatalog::from_json(&document)?;
//! let set = catalog.option_set_for(&ProductRef::new("ring").with_tag("engravable"))?;
//!
//! let resolver = VisibilityResolver::new(&set.options, &logger);
//! let props = LineProperties::build(&resolver, &selections, &NumberBounds::default(), Currency::USD)?;
//! println!("surcharge: {}", props.additional_price);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod option;
pub mod properties;
pub mod rules;
pub mod selection;
pub mod surcharge;
pub mod validate;
pub mod visibility;

pub use error::OptionsError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::OptionsError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::catalog::{OptionCatalog, OptionSetSource};
    pub use crate::option::{Dependency, OptionKind, OptionSet, OptionValue, ProductOption, ProductRef};
    pub use crate::properties::{LineItemProperty, LineProperties};
    pub use crate::rules::{NumberBounds, NumberInput};
    pub use crate::selection::Selections;
    pub use crate::surcharge::{Surcharge, SurchargeItem};
    pub use crate::validate::{validate, ValidationReport};
    pub use crate::visibility::{Gate, RadioState, VisibilityChange, VisibilityResolver};
}
