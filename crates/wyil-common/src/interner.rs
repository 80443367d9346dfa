//! String interning for identifiers.
//!
//! Field names, lifetime names, declaration names and type-variable names are
//! interned once into a shared pool and passed around as `Atom` handles, so
//! comparing two names is a `u32` comparison instead of a string comparison.

use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// An interned string identifier.
///
/// Atoms are cheap to copy and compare in O(1).
/// To get the string back, use [`ShardedInterner::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// Sentinel for the empty string.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS;
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;

/// Names that show up in almost every compilation unit.
const COMMON_STRINGS: &[&str] = &[
    // Primitive type keywords
    "void", "null", "bool", "byte", "int", "any",
    // Callable kinds
    "function", "method", "property",
    // Lifetimes
    "*", "this",
    // Declaration keywords
    "type", "where", "is", "import", "export", "public", "private", "native",
    // Common field and variable names
    "x", "y", "z", "val", "value", "next", "data", "items", "length", "head", "tail",
    "left", "right", "key", "T", "S", "U",
];

#[derive(Default)]
struct ShardState {
    map: FxHashMap<Arc<str>, Atom>,
    strings: Vec<Arc<str>>,
}

struct InternerShard {
    state: RwLock<ShardState>,
}

impl InternerShard {
    fn new() -> Self {
        InternerShard {
            state: RwLock::new(ShardState::default()),
        }
    }
}

/// Sharded string interner for concurrent use.
///
/// Fixed buckets keep lock contention low while `Atom` lookups stay O(1).
pub struct ShardedInterner {
    shards: [InternerShard; SHARD_COUNT],
}

impl ShardedInterner {
    /// Create an interner with the empty string pre-interned as `Atom::NONE`.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| InternerShard::new());

        if let Ok(mut state) = shards[0].state.write() {
            let empty: Arc<str> = Arc::from("");
            state.strings.push(empty.clone());
            state.map.insert(empty, Atom::NONE);
        }

        ShardedInterner { shards }
    }

    /// Intern a string, returning the existing atom if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> Atom {
        if s.is_empty() {
            return Atom::NONE;
        }

        let shard_idx = Self::shard_for(s);
        let Ok(mut state) = self.shards[shard_idx].state.write() else {
            return Atom::NONE;
        };

        if let Some(&atom) = state.map.get(s) {
            return atom;
        }

        let local_index = state.strings.len() as u32;
        if local_index > (u32::MAX >> SHARD_BITS) {
            return Atom::NONE;
        }

        let atom = Self::make_atom(local_index, shard_idx as u32);
        let owned: Arc<str> = Arc::from(s);
        state.strings.push(owned.clone());
        state.map.insert(owned, atom);
        atom
    }

    /// Resolve an atom; unknown atoms resolve to the empty string.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.try_resolve(atom).unwrap_or_else(|| Arc::from(""))
    }

    #[inline]
    pub fn try_resolve(&self, atom: Atom) -> Option<Arc<str>> {
        let (shard_idx, local_index) = Self::split_atom(atom);
        let shard = self.shards.get(shard_idx)?;
        let state = shard.state.read().ok()?;
        state.strings.get(local_index).cloned()
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .state
                    .read()
                    .map(|state| state.strings.len())
                    .unwrap_or(0)
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Pre-intern keywords and frequent identifiers.
    pub fn intern_common(&self) {
        for s in COMMON_STRINGS {
            self.intern(s);
        }
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hasher = FxHasher::default();
        s.hash(&mut hasher);
        (hasher.finish() as usize) & (SHARD_COUNT - 1)
    }

    #[inline]
    fn make_atom(local_index: u32, shard_idx: u32) -> Atom {
        Atom((local_index << SHARD_BITS) | (shard_idx & SHARD_MASK))
    }

    #[inline]
    fn split_atom(atom: Atom) -> (usize, usize) {
        let raw = atom.0;
        ((raw & SHARD_MASK) as usize, (raw >> SHARD_BITS) as usize)
    }
}

impl Default for ShardedInterner {
    fn default() -> Self {
        Self::new()
    }
}
