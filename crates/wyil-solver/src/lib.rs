//! Structural Type Selector Engine
//!
//! Decides structural subtyping between interned types and, more generally,
//! computes a [`Selector`]: which parts of a source type statically satisfy a
//! target type, which need a runtime type test, and which never can.
//!
//! - **Interning**: `TypeData` structures are interned into `TypeId` handles
//! - **Nominal links**: `Nominal(DeclId)` is resolved through a [`TypeResolver`]
//! - **Cycle detection**: coinductive semantics for recursive types
//!
//! ```ignore
//! let interner = TypeInterner::new();
//! let decls = DeclarationStore::new();
//! let lifetimes = StaticLifetimes::new(interner.intern_string(STATIC_LIFETIME));
//!
//! let int_or_null = interner.union2(TypeId::INT, TypeId::NULL);
//! let sel = selector(&interner, &decls, int_or_null, TypeId::INT, &lifetimes);
//! assert_eq!(sel.to_string(), "(top|bottom)");
//! assert_eq!(refine(&interner, &decls, int_or_null, &sel), TypeId::INT);
//! ```
pub mod def;
mod format;
mod intern;
pub mod lifetimes;
pub mod recursion;
mod refine;
mod relations;
pub mod selector;
pub mod types;

pub use def::*;
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use lifetimes::{LifetimeRelation, LifetimeScope, STATIC_LIFETIME, StaticLifetimes};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use refine::refine;
pub use relations::{SelectorBuilder, SelectorError, TypePair, is_subtype, selector};
pub use selector::Selector;
pub use types::*;

#[cfg(test)]
#[path = "../tests/selector_law_tests.rs"]
mod selector_law_tests;

#[cfg(test)]
#[path = "../tests/concurrent_tests.rs"]
mod concurrent_tests;

#[cfg(test)]
#[path = "../tests/tracing_tests.rs"]
mod tracing_tests;
