//! Rules for unions, intersections and negations.
//!
//! - Atom against union: the atom must fit one alternative entirely.
//! - Union against anything: one child selector per alternative of the left
//!   side, so a runtime test can tell which alternatives survive.
//! - Intersections and negations only match their own shape, positionally.
//!   There is no Boolean-algebra reasoning (`int & !null` is not simplified).

use crate::def::TypeResolver;
use crate::lifetimes::LifetimeRelation;
use crate::selector::Selector;
use crate::types::{TypeId, TypeListId};
use tracing::trace;

use super::super::SelectorBuilder;

impl<'a, R: TypeResolver, L: LifetimeRelation + ?Sized> SelectorBuilder<'a, R, L> {
    /// `lhs` against `A1|..|An` where `lhs` is not a union.
    ///
    /// `Top` on the first alternative that accepts all of `lhs`. A partial
    /// match against one alternative does not count: a value of `lhs` cannot
    /// be split across alternatives.
    pub(crate) fn atom_union_selector(&mut self, lhs: TypeId, rhs: TypeListId) -> Selector {
        let alternatives = self.type_list(rhs);
        for &alternative in alternatives.iter() {
            if self.construct(lhs, alternative).is_top() {
                trace!(lhs = lhs.0, alternative = alternative.0, "union alternative accepts atom");
                return Selector::Top;
            }
        }
        Selector::Bottom
    }

    /// `A1|..|An` against `rhs`: one child per alternative, in order.
    pub(crate) fn union_left_selector(&mut self, lhs: TypeListId, rhs: TypeId) -> Selector {
        let alternatives = self.type_list(lhs);
        let items = alternatives
            .iter()
            .map(|&alternative| self.construct(alternative, rhs))
            .collect();
        Selector::union_of(items)
    }

    /// `A1&..&An` against `B1&..&Bn`, operand by operand.
    pub(crate) fn intersection_selector(&mut self, lhs: TypeListId, rhs: TypeListId) -> Selector {
        let lhs_operands = self.type_list(lhs);
        let rhs_operands = self.type_list(rhs);
        if lhs_operands.len() != rhs_operands.len() {
            return Selector::Bottom;
        }

        for (&l, &r) in lhs_operands.iter().zip(rhs_operands.iter()) {
            if !self.construct(l, r).is_top() {
                return Selector::Bottom;
            }
        }
        Selector::Top
    }

    /// `!A` against `!B` holds when `A` and `B` describe the same values.
    pub(crate) fn negation_selector(&mut self, lhs: TypeId, rhs: TypeId) -> Selector {
        if self.construct(lhs, rhs).is_top() && self.construct(rhs, lhs).is_top() {
            Selector::Top
        } else {
            Selector::Bottom
        }
    }
}
