//! Selector-driven refinement.
//!
//! Applying a selector to its source type gives the type of the values the
//! selector keeps. A flow-typing client uses this to narrow a variable after
//! a runtime test: for `x: int|null` and `x is int` the selector is
//! `(top|bottom)`, and refining `int|null` with it gives `int`.
//!
//! Refinement never compares types; it only walks the source alongside the
//! selector. A selector that does not fit the source's shape leaves the
//! source unchanged.

use crate::def::{DeclId, TypeResolver};
use crate::intern::TypeInterner;
use crate::selector::Selector;
use crate::types::{FieldInfo, TypeData, TypeId};
use rustc_hash::FxHashSet;
use tracing::trace;

/// The part of `source` kept by `selector`.
///
/// `Top` keeps `source`, `Bottom` gives `void`. Structured selectors are
/// applied through nominal types, which are unfolded first.
pub fn refine<R: TypeResolver>(
    interner: &TypeInterner,
    resolver: &R,
    source: TypeId,
    selector: &Selector,
) -> TypeId {
    Refiner { interner, resolver }.refine(source, selector)
}

struct Refiner<'a, R: TypeResolver> {
    interner: &'a TypeInterner,
    resolver: &'a R,
}

impl<'a, R: TypeResolver> Refiner<'a, R> {
    fn refine(&self, source: TypeId, selector: &Selector) -> TypeId {
        match selector {
            Selector::Top => source,
            Selector::Bottom => TypeId::VOID,
            Selector::Array(element) => {
                let concrete = self.concrete(source);
                match self.interner.lookup(concrete) {
                    Some(TypeData::Array(source_element)) => {
                        let refined = self.refine(source_element, element);
                        self.interner.array(refined)
                    }
                    _ => self.mismatch(source, selector),
                }
            }
            Selector::Record(items) => {
                let concrete = self.concrete(source);
                let Some(TypeData::Record(shape_id)) = self.interner.lookup(concrete) else {
                    return self.mismatch(source, selector);
                };
                let Some(shape) = self.interner.record_shape(shape_id) else {
                    return self.mismatch(source, selector);
                };
                if shape.fields.len() != items.len() {
                    return self.mismatch(source, selector);
                }
                let fields = shape
                    .fields
                    .iter()
                    .zip(items)
                    .map(|(field, item)| FieldInfo::new(field.name, self.refine(field.type_id, item)))
                    .collect();
                self.interner.record(shape.is_open, fields)
            }
            Selector::Union(items) => {
                let concrete = self.concrete(source);
                let Some(TypeData::Union(list_id)) = self.interner.lookup(concrete) else {
                    return self.mismatch(source, selector);
                };
                let Some(alternatives) = self.interner.type_list(list_id) else {
                    return self.mismatch(source, selector);
                };
                if alternatives.len() != items.len() {
                    return self.mismatch(source, selector);
                }
                let kept = alternatives
                    .iter()
                    .zip(items)
                    .filter(|(_, item)| !item.is_bottom())
                    .map(|(&alternative, item)| self.refine(alternative, item))
                    .collect();
                self.interner.union(kept)
            }
        }
    }

    /// Follow nominal links until a structural type is reached.
    ///
    /// Stops at a declaration without a body or on an alias cycle.
    fn concrete(&self, mut id: TypeId) -> TypeId {
        let mut seen: FxHashSet<DeclId> = FxHashSet::default();
        while let Some(TypeData::Nominal(decl)) = self.interner.lookup(id) {
            if !seen.insert(decl) {
                break;
            }
            match self.resolver.concrete_type(decl) {
                Some(body) => id = body,
                None => break,
            }
        }
        id
    }

    fn mismatch(&self, source: TypeId, selector: &Selector) -> TypeId {
        trace!(source = source.0, selector = %selector, "selector does not fit source shape");
        source
    }
}

#[cfg(test)]
#[path = "../tests/refine_tests.rs"]
mod tests;
