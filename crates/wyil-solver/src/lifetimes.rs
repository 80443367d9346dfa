//! Lifetime relations.
//!
//! A lifetime relation answers whether one named lifetime is nested within
//! another. The selector engine threads a relation through every comparison;
//! no comparison rule consults it yet.

use rustc_hash::FxHashMap;
use wyil_common::Atom;

/// Name of the static (outermost) lifetime.
pub const STATIC_LIFETIME: &str = "*";

pub trait LifetimeRelation {
    /// Whether `inner` is contained in `outer`. Every lifetime is within itself.
    fn is_within(&self, inner: Atom, outer: Atom) -> bool;
}

/// The relation with no declared lifetimes besides the static one.
#[derive(Copy, Clone, Debug)]
pub struct StaticLifetimes {
    static_lifetime: Atom,
}

impl StaticLifetimes {
    pub fn new(static_lifetime: Atom) -> Self {
        Self { static_lifetime }
    }
}

impl LifetimeRelation for StaticLifetimes {
    fn is_within(&self, inner: Atom, outer: Atom) -> bool {
        inner == outer || outer == self.static_lifetime
    }
}

/// Lifetimes declared by nesting, e.g. named blocks inside a method body.
#[derive(Clone, Debug)]
pub struct LifetimeScope {
    static_lifetime: Atom,
    parents: FxHashMap<Atom, Atom>,
}

impl LifetimeScope {
    pub fn new(static_lifetime: Atom) -> Self {
        Self {
            static_lifetime,
            parents: FxHashMap::default(),
        }
    }

    /// Declare `inner` as directly nested in `outer`.
    pub fn declare(&mut self, inner: Atom, outer: Atom) {
        self.parents.insert(inner, outer);
    }

    pub fn parent(&self, lifetime: Atom) -> Option<Atom> {
        self.parents.get(&lifetime).copied()
    }
}

impl LifetimeRelation for LifetimeScope {
    fn is_within(&self, inner: Atom, outer: Atom) -> bool {
        if outer == self.static_lifetime {
            return true;
        }
        let mut current = inner;
        // Bounded by the number of declarations, so a malformed cyclic
        // declaration cannot loop forever.
        for _ in 0..=self.parents.len() {
            if current == outer {
                return true;
            }
            match self.parents.get(&current) {
                Some(&parent) => current = parent,
                None => return false,
            }
        }
        false
    }
}
