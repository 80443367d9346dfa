//! Selector construction.
//!
//! `SelectorBuilder` compares a source type (`lhs`) against a target type
//! (`rhs`) and produces a [`Selector`]. The comparison is structural and
//! coinductive: each unordered pair of types is entered into a recursion guard
//! before it is compared, and meeting a pair that is still in progress yields
//! `Top`. That assumption is what lets recursive nominal types terminate; the
//! remaining structural checks validate it.
//!
//! Dispatch first classifies both sides into a [`ShapeFamily`]. Static and
//! lifetime references share a family, as do functions, methods and
//! properties; the comparison rules in `selector_rules` tell them apart.
//!
//! A builder is consumed by its query, so the in-progress set of one query is
//! never seen by another. Queries on different threads each build their own.

use crate::def::TypeResolver;
use crate::format::TypeFormatter;
use crate::intern::TypeInterner;
use crate::lifetimes::LifetimeRelation;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::selector::Selector;
use crate::types::{
    CallableShape, CallableShapeId, IntrinsicKind, RecordShape, RecordShapeId, TypeData, TypeId,
    TypeListId,
};
use std::fmt;
use std::sync::Arc;
use tracing::{Level, span, trace};

/// Unordered pair of types, the key of the in-progress set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypePair {
    low: TypeId,
    high: TypeId,
}

impl TypePair {
    pub fn new(a: TypeId, b: TypeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

/// Comparison family of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ShapeFamily {
    Primitive(IntrinsicKind),
    Array,
    Record,
    Reference,
    Callable,
    Union,
    Intersection,
    Negation,
    Nominal,
    Variable,
}

impl ShapeFamily {
    /// `None` for data outside the comparable taxonomy.
    pub(crate) fn of(data: &TypeData) -> Option<Self> {
        Some(match data {
            TypeData::Intrinsic(kind) => ShapeFamily::Primitive(*kind),
            TypeData::Array(_) => ShapeFamily::Array,
            TypeData::Record(_) => ShapeFamily::Record,
            TypeData::Reference(_) => ShapeFamily::Reference,
            TypeData::Callable(_) => ShapeFamily::Callable,
            TypeData::Union(_) => ShapeFamily::Union,
            TypeData::Intersection(_) => ShapeFamily::Intersection,
            TypeData::Negation(_) => ShapeFamily::Negation,
            TypeData::Nominal(_) => ShapeFamily::Nominal,
            TypeData::Variable(_) => ShapeFamily::Variable,
            TypeData::Unresolved(_) => return None,
        })
    }
}

/// Failure of a bounded selector query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The recursion profile's depth or iteration budget ran out.
    LimitExceeded { max_depth: u32, max_iterations: u32 },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::LimitExceeded {
                max_depth,
                max_iterations,
            } => write!(
                f,
                "selector construction exceeded its limits (depth {max_depth}, iterations {max_iterations})"
            ),
        }
    }
}

impl std::error::Error for SelectorError {}

/// Builds one selector.
pub struct SelectorBuilder<'a, R: TypeResolver, L: LifetimeRelation + ?Sized> {
    pub(crate) interner: &'a TypeInterner,
    pub(crate) resolver: &'a R,
    /// Threaded through every comparison; not consulted by any rule yet.
    pub(crate) lifetimes: &'a L,
    pub(crate) guard: RecursionGuard<TypePair>,
}

impl<'a, R: TypeResolver, L: LifetimeRelation + ?Sized> SelectorBuilder<'a, R, L> {
    pub fn new(interner: &'a TypeInterner, resolver: &'a R, lifetimes: &'a L) -> Self {
        Self {
            interner,
            resolver,
            lifetimes,
            guard: RecursionGuard::with_profile(RecursionProfile::SelectorConstruction),
        }
    }

    /// Replace the recursion limits. Limits are only reported by
    /// [`try_selector`](Self::try_selector).
    pub fn with_profile(mut self, profile: RecursionProfile) -> Self {
        self.guard = RecursionGuard::with_profile(profile);
        self
    }

    pub fn lifetimes(&self) -> &'a L {
        self.lifetimes
    }

    /// Compute the selector of `lhs` against `rhs`.
    pub fn selector(mut self, lhs: TypeId, rhs: TypeId) -> Selector {
        self.construct(lhs, rhs)
    }

    /// Compute the selector, failing if the recursion profile is exhausted.
    pub fn try_selector(mut self, lhs: TypeId, rhs: TypeId) -> Result<Selector, SelectorError> {
        let selector = self.construct(lhs, rhs);
        if self.guard.is_exceeded() {
            return Err(SelectorError::LimitExceeded {
                max_depth: self.guard.max_depth(),
                max_iterations: self.guard.max_iterations(),
            });
        }
        Ok(selector)
    }

    /// Guarded comparison of one pair. Every rule recurses through here.
    pub(crate) fn construct(&mut self, lhs: TypeId, rhs: TypeId) -> Selector {
        let pair = TypePair::new(lhs, rhs);
        match self.guard.enter(pair) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => {
                trace!(lhs = lhs.0, rhs = rhs.0, "pair already in progress, assuming top");
                return Selector::Top;
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                trace!(lhs = lhs.0, rhs = rhs.0, "recursion limit reached");
                return Selector::Bottom;
            }
        }

        let result = self.dispatch(lhs, rhs);
        self.guard.leave(pair);
        result
    }

    fn dispatch(&mut self, lhs: TypeId, rhs: TypeId) -> Selector {
        let _span = span!(Level::TRACE, "selector", lhs = lhs.0, rhs = rhs.0).entered();

        let lhs_data = self.data(lhs);
        let rhs_data = self.data(rhs);
        let lhs_family = self.family(lhs, &lhs_data);
        let rhs_family = self.family(rhs, &rhs_data);

        let result = if lhs_family == rhs_family {
            match (&lhs_data, &rhs_data) {
                (TypeData::Intrinsic(_), TypeData::Intrinsic(_)) => Selector::Top,
                (TypeData::Array(l), TypeData::Array(r)) => self.array_selector(*l, *r),
                (TypeData::Record(l), TypeData::Record(r)) => self.record_selector(*l, *r),
                (TypeData::Reference(l), TypeData::Reference(r)) => self.reference_selector(l, r),
                (TypeData::Callable(l), TypeData::Callable(r)) => self.callable_selector(*l, *r),
                (TypeData::Variable(l), TypeData::Variable(r)) => self.variable_selector(*l, *r),
                (TypeData::Nominal(l), TypeData::Nominal(r)) => self.nominal_selector(*l, *r),
                (TypeData::Union(l), _) => self.union_left_selector(*l, rhs),
                (TypeData::Intersection(l), TypeData::Intersection(r)) => {
                    self.intersection_selector(*l, *r)
                }
                (TypeData::Negation(l), TypeData::Negation(r)) => self.negation_selector(*l, *r),
                _ => self.unexpected(lhs),
            }
        } else if let TypeData::Nominal(r) = rhs_data {
            self.unfold_rhs_selector(lhs, r)
        } else if let TypeData::Union(r) = rhs_data {
            self.atom_union_selector(lhs, r)
        } else if let TypeData::Union(l) = lhs_data {
            self.union_left_selector(l, rhs)
        } else if let TypeData::Nominal(l) = lhs_data {
            self.unfold_lhs_selector(l, rhs)
        } else if lhs == TypeId::VOID {
            // void has no values, so it is a subtype of everything.
            Selector::Top
        } else {
            Selector::Bottom
        };

        trace!(result = %result, "selector computed");
        result
    }

    fn data(&self, id: TypeId) -> TypeData {
        match self.interner.lookup(id) {
            Some(data) => data,
            None => self.unexpected(id),
        }
    }

    fn family(&self, id: TypeId, data: &TypeData) -> ShapeFamily {
        match ShapeFamily::of(data) {
            Some(family) => family,
            None => self.unexpected(id),
        }
    }

    pub(crate) fn record_shape(&self, id: RecordShapeId) -> Arc<RecordShape> {
        match self.interner.record_shape(id) {
            Some(shape) => shape,
            None => self.unexpected_component("record shape", id.0),
        }
    }

    pub(crate) fn callable_shape(&self, id: CallableShapeId) -> Arc<CallableShape> {
        match self.interner.callable_shape(id) {
            Some(shape) => shape,
            None => self.unexpected_component("callable shape", id.0),
        }
    }

    pub(crate) fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        match self.interner.type_list(id) {
            Some(list) => list,
            None => self.unexpected_component("type list", id.0),
        }
    }

    fn unexpected_component(&self, what: &str, index: u32) -> ! {
        panic!("unexpected type encountered: <unknown {what} #{index}>");
    }

    /// Abort on a type graph that was not fully resolved upstream.
    pub(crate) fn unexpected(&self, id: TypeId) -> ! {
        let rendered = TypeFormatter::new(self.interner)
            .with_resolver(self.resolver)
            .format(id);
        panic!("unexpected type encountered: {rendered}");
    }
}

/// Compute the selector of `lhs` against `rhs`.
///
/// `Top` means every value of `lhs` is a value of `rhs`, `Bottom` that none
/// is, and a structured selector marks which components of `lhs` need a
/// runtime test.
///
/// # Panics
///
/// Panics with `unexpected type encountered` if either type graph contains an
/// unresolved placeholder, an unknown `TypeId` or shape id, or a nominal type whose
/// declaration has no body.
pub fn selector<R: TypeResolver, L: LifetimeRelation + ?Sized>(
    interner: &TypeInterner,
    resolver: &R,
    lhs: TypeId,
    rhs: TypeId,
    lifetimes: &L,
) -> Selector {
    SelectorBuilder::new(interner, resolver, lifetimes).selector(lhs, rhs)
}

/// Whether `lhs <: rhs` holds without any runtime check.
pub fn is_subtype<R: TypeResolver, L: LifetimeRelation + ?Sized>(
    interner: &TypeInterner,
    resolver: &R,
    lhs: TypeId,
    rhs: TypeId,
    lifetimes: &L,
) -> bool {
    selector(interner, resolver, lhs, rhs, lifetimes).is_top()
}

#[cfg(test)]
#[path = "../../tests/selector_tests.rs"]
mod tests;
