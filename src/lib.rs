//! wyil type engine.
//!
//! Structural subtyping and selector construction for the wyil intermediate
//! language. The engine lives in `wyil-solver`; this crate re-exports it
//! together with string interning from `wyil-common` and owns the tracing
//! setup used by tools that embed the engine.

// String interning for field, lifetime and declaration names
pub use wyil_common::{Atom, ShardedInterner, interner};

// Type representation, selector construction and refinement
pub use wyil_solver as solver;
pub use wyil_solver::{
    DeclId, DeclarationInfo, DeclarationStore, LifetimeRelation, LifetimeScope, QualifiedName,
    RecursionProfile, STATIC_LIFETIME, Selector, SelectorBuilder, SelectorError, StaticLifetimes,
    TypeData, TypeFormatter, TypeId, TypeInterner, TypeResolver, is_subtype, refine, selector,
};

// Tracing configuration (text, tree and JSON output)
pub mod tracing_config;
