//! Nominal unfolding.
//!
//! A nominal type is compared through its declaration's concrete type. The
//! declaration's `where` clauses are ignored, so `nat` (`int where $ > 0`)
//! and `evens` (`int where $ % 2 == 0`) both unfold to `int` and compare
//! `Top` against each other.

use crate::def::{DeclId, TypeResolver};
use crate::lifetimes::LifetimeRelation;
use crate::selector::Selector;
use crate::types::TypeId;
use tracing::trace;

use super::super::SelectorBuilder;

impl<'a, R: TypeResolver, L: LifetimeRelation + ?Sized> SelectorBuilder<'a, R, L> {
    /// Two nominal types. The same declaration matches without unfolding.
    pub(crate) fn nominal_selector(&mut self, lhs: DeclId, rhs: DeclId) -> Selector {
        if lhs == rhs {
            return Selector::Top;
        }
        let lhs_body = self.unfold(lhs);
        let rhs_body = self.unfold(rhs);
        self.construct(lhs_body, rhs_body)
    }

    /// `lhs` against a nominal `rhs` of a different family.
    pub(crate) fn unfold_rhs_selector(&mut self, lhs: TypeId, rhs: DeclId) -> Selector {
        let rhs_body = self.unfold(rhs);
        self.construct(lhs, rhs_body)
    }

    /// A nominal `lhs` against a non-union `rhs` of a different family.
    pub(crate) fn unfold_lhs_selector(&mut self, lhs: DeclId, rhs: TypeId) -> Selector {
        let lhs_body = self.unfold(lhs);
        self.construct(lhs_body, rhs)
    }

    fn unfold(&self, decl: DeclId) -> TypeId {
        match self.resolver.concrete_type(decl) {
            Some(body) => {
                trace!(decl = decl.0, body = body.0, "unfolding nominal");
                body
            }
            None => {
                let link = self.interner.nominal(decl);
                self.unexpected(link)
            }
        }
    }
}
