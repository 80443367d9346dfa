pub(crate) mod builder;
pub(crate) mod selector_rules;

pub use builder::{SelectorBuilder, SelectorError, TypePair, is_subtype, selector};
