//! Rules for non-union shapes of the same family: arrays, records,
//! references, callables and template variables.

use crate::def::TypeResolver;
use crate::lifetimes::LifetimeRelation;
use crate::selector::Selector;
use crate::types::{CallableShapeId, RecordShapeId, ReferenceShape, TypeId, VarId};

use super::super::SelectorBuilder;

impl<'a, R: TypeResolver, L: LifetimeRelation + ?Sized> SelectorBuilder<'a, R, L> {
    /// `T1[]` against `T2[]` wraps the element selector; `Top` and `Bottom`
    /// pass through unwrapped.
    pub(crate) fn array_selector(&mut self, lhs_element: TypeId, rhs_element: TypeId) -> Selector {
        Selector::array_of(self.construct(lhs_element, rhs_element))
    }

    /// Records compare field by field in declared order.
    ///
    /// Field count, openness and every field name must agree, otherwise the
    /// result is `Bottom`. A record value needs all of its fields to match,
    /// so a single `Bottom` field selector makes the whole record `Bottom`.
    pub(crate) fn record_selector(&mut self, lhs: RecordShapeId, rhs: RecordShapeId) -> Selector {
        let lhs_shape = self.record_shape(lhs);
        let rhs_shape = self.record_shape(rhs);

        if lhs_shape.is_open != rhs_shape.is_open
            || lhs_shape.fields.len() != rhs_shape.fields.len()
        {
            return Selector::Bottom;
        }

        let mut items = Vec::with_capacity(lhs_shape.fields.len());
        for (lhs_field, rhs_field) in lhs_shape.fields.iter().zip(rhs_shape.fields.iter()) {
            if lhs_field.name != rhs_field.name {
                return Selector::Bottom;
            }
            let item = self.construct(lhs_field.type_id, rhs_field.type_id);
            if item.is_bottom() {
                return Selector::Bottom;
            }
            items.push(item);
        }

        Selector::record_of(items)
    }

    /// `&T1` against `&T2` is `Top` when `T1` is a subtype of `T2`, and
    /// `Bottom` otherwise.
    ///
    /// Only the lhs-to-rhs direction of the elements is checked, so
    /// `&int` against `&(int|null)` is `Top`. A partial element selector
    /// counts as no match, since a reference cannot be narrowed by a runtime
    /// test. Lifetimes are not compared.
    pub(crate) fn reference_selector(
        &mut self,
        lhs: &ReferenceShape,
        rhs: &ReferenceShape,
    ) -> Selector {
        if self.construct(lhs.element, rhs.element).is_top() {
            Selector::Top
        } else {
            Selector::Bottom
        }
    }

    /// Callables of the same kind with the same arity match when every
    /// parameter and every return type matches exactly (`Top`).
    ///
    /// No runtime test can inspect a callable's signature, so partial matches
    /// are `Bottom`. Method lifetime parameters and captured lifetimes are not
    /// compared.
    pub(crate) fn callable_selector(
        &mut self,
        lhs: CallableShapeId,
        rhs: CallableShapeId,
    ) -> Selector {
        let lhs_shape = self.callable_shape(lhs);
        let rhs_shape = self.callable_shape(rhs);

        if lhs_shape.kind != rhs_shape.kind
            || lhs_shape.params.len() != rhs_shape.params.len()
            || lhs_shape.returns.len() != rhs_shape.returns.len()
        {
            return Selector::Bottom;
        }

        let params = lhs_shape.params.iter().zip(rhs_shape.params.iter());
        let returns = lhs_shape.returns.iter().zip(rhs_shape.returns.iter());
        for (&l, &r) in params.chain(returns) {
            if !self.construct(l, r).is_top() {
                return Selector::Bottom;
            }
        }

        Selector::Top
    }

    /// Template variables match only their own binder.
    pub(crate) fn variable_selector(&mut self, lhs: VarId, rhs: VarId) -> Selector {
        if lhs == rhs {
            Selector::Top
        } else {
            Selector::Bottom
        }
    }
}
