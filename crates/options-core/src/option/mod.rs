//! Option model.
//!
//! Contains the declarative schema for options, their values, and the
//! option sets that group them per product.

mod model;
mod price;
mod set;

pub use model::{Dependency, OptionKind, OptionValue, ProductOption};
pub use set::{OptionSet, ProductRef};
