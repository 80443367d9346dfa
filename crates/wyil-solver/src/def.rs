//! Declaration identifiers and storage for nominal types.
//!
//! A `Nominal` type is nothing more than a `DeclId`. The declaration carries
//! the qualified name, the concrete (right-hand-side) type and the source text
//! of any `where` clauses. Declarations are allocated before their body is
//! known so a body can refer to its own declaration:
//!
//! ```ignore
//! // type Node is {int val, Node|null next}
//! let node = store.declare(QualifiedName::simple(interner.intern_string("Node")));
//! let node_ty = interner.nominal(node);
//! let body = interner.record(false, vec![
//!     FieldInfo::new(interner.intern_string("val"), TypeId::INT),
//!     FieldInfo::new(interner.intern_string("next"), interner.union2(node_ty, TypeId::NULL)),
//! ]);
//! store.define(node, body);
//! ```

use crate::types::TypeId;
use dashmap::DashMap;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;
use wyil_common::{Atom, ShardedInterner};

/// Counter for telling `DeclarationStore` instances apart in traces.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a type declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

impl DeclId {
    pub const INVALID: Self = Self(0);

    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

/// A module-qualified declaration name such as `std::ascii::string`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub path: SmallVec<[Atom; 4]>,
}

impl QualifiedName {
    pub fn new(path: impl IntoIterator<Item = Atom>) -> Self {
        Self {
            path: path.into_iter().collect(),
        }
    }

    /// A name with no module prefix.
    pub fn simple(name: Atom) -> Self {
        Self::new([name])
    }

    /// The last path segment.
    pub fn name(&self) -> Atom {
        self.path.last().copied().unwrap_or(Atom::NONE)
    }

    pub fn display(&self, strings: &ShardedInterner) -> String {
        self.path
            .iter()
            .map(|atom| strings.resolve(*atom).to_string())
            .collect::<Vec<_>>()
            .join("::")
    }
}

/// Everything the store knows about one declaration.
#[derive(Clone, Debug)]
pub struct DeclarationInfo {
    pub name: QualifiedName,

    /// Concrete type; `None` until the declaration is defined.
    pub body: Option<TypeId>,

    /// Source text of the `where` clauses, kept for diagnostics only.
    pub invariants: Vec<Atom>,
}

impl DeclarationInfo {
    pub fn new(name: QualifiedName, body: TypeId) -> Self {
        Self {
            name,
            body: Some(body),
            invariants: Vec::new(),
        }
    }

    pub fn with_invariant(mut self, clause: Atom) -> Self {
        self.invariants.push(clause);
        self
    }
}

/// Resolves nominal links to their concrete types.
///
/// This is the only door the selector engine has into declarations.
pub trait TypeResolver {
    fn concrete_type(&self, decl: DeclId) -> Option<TypeId>;

    fn declaration_name(&self, _decl: DeclId) -> Option<QualifiedName> {
        None
    }
}

/// Thread-safe storage for type declarations.
pub struct DeclarationStore {
    instance_id: u64,
    declarations: DashMap<DeclId, DeclarationInfo>,
    next_id: AtomicU32,
}

impl Default for DeclarationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationStore {
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "DeclarationStore::new");
        Self {
            instance_id,
            declarations: DashMap::new(),
            next_id: AtomicU32::new(DeclId::FIRST_VALID),
        }
    }

    fn allocate(&self) -> DeclId {
        DeclId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Allocate a declaration whose body is supplied later with [`define`].
    ///
    /// [`define`]: Self::define
    pub fn declare(&self, name: QualifiedName) -> DeclId {
        let id = self.allocate();
        trace!(instance_id = self.instance_id, decl_id = id.0, "DeclarationStore::declare");
        self.declarations.insert(
            id,
            DeclarationInfo {
                name,
                body: None,
                invariants: Vec::new(),
            },
        );
        id
    }

    /// Register a fully-formed declaration.
    pub fn register(&self, info: DeclarationInfo) -> DeclId {
        let id = self.allocate();
        trace!(
            instance_id = self.instance_id,
            decl_id = id.0,
            has_body = info.body.is_some(),
            "DeclarationStore::register"
        );
        self.declarations.insert(id, info);
        id
    }

    /// Set the concrete type of a declared name.
    pub fn define(&self, id: DeclId, body: TypeId) {
        if let Some(mut entry) = self.declarations.get_mut(&id) {
            entry.body = Some(body);
        }
    }

    pub fn add_invariant(&self, id: DeclId, clause: Atom) {
        if let Some(mut entry) = self.declarations.get_mut(&id) {
            entry.invariants.push(clause);
        }
    }

    pub fn get(&self, id: DeclId) -> Option<DeclarationInfo> {
        self.declarations.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: DeclId) -> bool {
        self.declarations.contains_key(&id)
    }

    pub fn get_body(&self, id: DeclId) -> Option<TypeId> {
        self.declarations.get(&id).and_then(|r| r.body)
    }

    pub fn get_name(&self, id: DeclId) -> Option<QualifiedName> {
        self.declarations.get(&id).map(|r| r.name.clone())
    }

    pub fn get_invariants(&self, id: DeclId) -> Option<Vec<Atom>> {
        self.declarations.get(&id).map(|r| r.invariants.clone())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl TypeResolver for DeclarationStore {
    fn concrete_type(&self, decl: DeclId) -> Option<TypeId> {
        self.get_body(decl)
    }

    fn declaration_name(&self, decl: DeclId) -> Option<QualifiedName> {
        self.get_name(decl)
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
