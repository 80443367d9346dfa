//! Type interning for structural deduplication.
//!
//! The interner turns `TypeData` values into lightweight `TypeId` handles.
//!
//! Benefits:
//! - O(1) type equality (compare `TypeId` values)
//! - Each unique structure is stored once and shared
//! - Safe to use from several threads: storage sits behind sharded `RwLock`s

use crate::def::DeclId;
use crate::types::*;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use wyil_common::{Atom, ShardedInterner};

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 64 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;
const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeData, u32>>,
    index_to_key: RwLock<Vec<TypeData>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: Vec<T>) -> u32 {
        if items.is_empty() {
            return 0;
        }

        if let Some(&id) = self.map.get(items.as_slice()) {
            return id;
        }

        let arc: Arc<[T]> = items.into();
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }
}

struct ValueInterner<T> {
    items: Vec<Arc<T>>,
    map: FxHashMap<Arc<T>, u32>,
}

impl<T> ValueInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        ValueInterner {
            items: Vec::new(),
            map: FxHashMap::default(),
        }
    }

    fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }

        let arc = Arc::new(value);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<T>> {
        self.items.get(id as usize).cloned()
    }
}

/// Type interning table.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// Field, lifetime and variable names.
    pub string_interner: ShardedInterner,
    type_lists: RwLock<SliceInterner<TypeId>>,
    record_shapes: RwLock<ValueInterner<RecordShape>>,
    callable_shapes: RwLock<ValueInterner<CallableShape>>,
    /// Name of each template-variable binder, indexed by `VarId`.
    variables: RwLock<Vec<Atom>>,
}

impl TypeInterner {
    /// Create an interner with the primitives pre-registered.
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            string_interner: {
                let interner = ShardedInterner::new();
                interner.intern_common();
                interner
            },
            type_lists: RwLock::new(SliceInterner::new()),
            record_shapes: RwLock::new(ValueInterner::new()),
            callable_shapes: RwLock::new(ValueInterner::new()),
            variables: RwLock::new(Vec::new()),
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    /// `None` for an id this interner never handed out.
    pub fn type_list(&self, id: TypeListId) -> Option<Arc<[TypeId]>> {
        self.type_lists
            .read()
            .expect("type_lists lock poisoned")
            .get(id.0)
    }

    pub fn record_shape(&self, id: RecordShapeId) -> Option<Arc<RecordShape>> {
        self.record_shapes
            .read()
            .expect("record_shapes lock poisoned")
            .get(id.0)
    }

    pub fn callable_shape(&self, id: CallableShapeId) -> Option<Arc<CallableShape>> {
        self.callable_shapes
            .read()
            .expect("callable_shapes lock poisoned")
            .get(id.0)
    }

    /// Name the binder of a template variable was declared with.
    pub fn variable_name(&self, id: VarId) -> Option<Atom> {
        self.variables
            .read()
            .expect("variables lock poisoned")
            .get(id.0 as usize)
            .copied()
    }

    /// Intern a `TypeData` and return its `TypeId`.
    ///
    /// No normalization happens here; use the constructors below for that.
    pub fn intern(&self, key: TypeData) -> TypeId {
        if let TypeData::Intrinsic(kind) = key {
            return kind.to_type_id();
        }

        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard.key_to_index.read().expect("shard key_to_index lock poisoned");
            if let Some(&local_index) = map.get(&key) {
                return self.make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard.key_to_index.write().expect("shard key_to_index lock poisoned");
        let mut storage = shard.index_to_key.write().expect("shard index_to_key lock poisoned");

        if let Some(&local_index) = map.get(&key) {
            return self.make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        assert!(
            local_index <= (u32::MAX >> SHARD_BITS),
            "type interner shard {shard_idx} is full"
        );

        storage.push(key.clone());
        map.insert(key, local_index);

        self.make_id(local_index, shard_idx as u32)
    }

    /// Look up the `TypeData` behind a `TypeId`.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        if let Some(kind) = IntrinsicKind::from_type_id(id) {
            return Some(TypeData::Intrinsic(kind));
        }

        let raw_val = id.0.checked_sub(TypeId::FIRST_USER)?;
        let shard_idx = (raw_val & SHARD_MASK) as usize;
        let local_index = raw_val >> SHARD_BITS;

        let shard = self.shards.get(shard_idx)?;
        let storage = shard.index_to_key.read().expect("shard index_to_key lock poisoned");
        storage.get(local_index as usize).cloned()
    }

    fn intern_type_list(&self, members: Vec<TypeId>) -> TypeListId {
        let mut lists = self.type_lists.write().expect("type_lists lock poisoned");
        TypeListId(lists.intern(members))
    }

    fn intern_record_shape(&self, shape: RecordShape) -> RecordShapeId {
        let mut shapes = self.record_shapes.write().expect("record_shapes lock poisoned");
        RecordShapeId(shapes.intern(shape))
    }

    fn intern_callable_shape(&self, shape: CallableShape) -> CallableShapeId {
        let mut shapes = self.callable_shapes.write().expect("callable_shapes lock poisoned");
        CallableShapeId(shapes.intern(shape))
    }

    /// Number of interned types, counting the reserved intrinsic range.
    pub fn len(&self) -> usize {
        let mut total = TypeId::FIRST_USER as usize;
        for shard in &self.shards {
            total += shard.index_to_key.read().expect("shard index_to_key lock poisoned").len();
        }
        total
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= TypeId::FIRST_USER as usize
    }

    #[inline]
    fn make_id(&self, local_index: u32, shard_idx: u32) -> TypeId {
        let raw_val = (local_index << SHARD_BITS) | (shard_idx & SHARD_MASK);
        TypeId(TypeId::FIRST_USER + raw_val)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn intrinsic(&self, kind: IntrinsicKind) -> TypeId {
        kind.to_type_id()
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    /// Intern a record. Field order is significant and names must be unique.
    pub fn record(&self, is_open: bool, fields: Vec<FieldInfo>) -> TypeId {
        debug_assert!(
            fields
                .iter()
                .enumerate()
                .all(|(i, f)| fields[..i].iter().all(|g| g.name != f.name)),
            "record field names must be unique"
        );
        let shape_id = self.intern_record_shape(RecordShape { is_open, fields });
        self.intern(TypeData::Record(shape_id))
    }

    /// Intern a reference; `None` gives the static reference `&T`.
    pub fn reference(&self, element: TypeId, lifetime: Option<Atom>) -> TypeId {
        self.intern(TypeData::Reference(ReferenceShape { element, lifetime }))
    }

    pub fn function(&self, params: Vec<TypeId>, returns: Vec<TypeId>) -> TypeId {
        self.callable(CallableShape {
            kind: CallableKind::Function,
            params,
            returns,
            captured_lifetimes: Vec::new(),
            lifetime_params: Vec::new(),
        })
    }

    pub fn method(
        &self,
        params: Vec<TypeId>,
        returns: Vec<TypeId>,
        captured_lifetimes: Vec<Atom>,
        lifetime_params: Vec<Atom>,
    ) -> TypeId {
        self.callable(CallableShape {
            kind: CallableKind::Method,
            params,
            returns,
            captured_lifetimes,
            lifetime_params,
        })
    }

    pub fn property(&self, params: Vec<TypeId>, returns: Vec<TypeId>) -> TypeId {
        self.callable(CallableShape {
            kind: CallableKind::Property,
            params,
            returns,
            captured_lifetimes: Vec::new(),
            lifetime_params: Vec::new(),
        })
    }

    pub fn callable(&self, shape: CallableShape) -> TypeId {
        let shape_id = self.intern_callable_shape(shape);
        self.intern(TypeData::Callable(shape_id))
    }

    /// Intern a union, flattening nested unions and dropping `void` and
    /// duplicate alternatives. Alternative order is preserved.
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        self.union_from_iter(members)
    }

    pub fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.union_from_iter([left, right])
    }

    fn union_from_iter<I>(&self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut flat: TypeListBuffer = SmallVec::new();
        for member in members {
            self.flatten_into(&mut flat, member, |data| match data {
                TypeData::Union(list) => Some(*list),
                _ => None,
            });
        }
        flat.retain(|member| *member != TypeId::VOID);

        match flat.len() {
            0 => TypeId::VOID,
            1 => flat[0],
            _ => {
                let list_id = self.intern_type_list(flat.into_vec());
                self.intern(TypeData::Union(list_id))
            }
        }
    }

    /// Intern an intersection, flattening nested intersections and dropping
    /// duplicate operands. Operand order is preserved.
    pub fn intersection(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: TypeListBuffer = SmallVec::new();
        for member in members {
            self.flatten_into(&mut flat, member, |data| match data {
                TypeData::Intersection(list) => Some(*list),
                _ => None,
            });
        }

        match flat.len() {
            0 => TypeId::ANY,
            1 => flat[0],
            _ => {
                let list_id = self.intern_type_list(flat.into_vec());
                self.intern(TypeData::Intersection(list_id))
            }
        }
    }

    fn flatten_into(
        &self,
        flat: &mut TypeListBuffer,
        member: TypeId,
        nested: impl Fn(&TypeData) -> Option<TypeListId> + Copy,
    ) {
        let nested_list = self.lookup(member).as_ref().and_then(nested);
        match nested_list {
            Some(list_id) => {
                for &inner in self.type_list(list_id).iter().flat_map(|list| list.iter()) {
                    self.flatten_into(flat, inner, nested);
                }
            }
            None => {
                if !flat.contains(&member) {
                    flat.push(member);
                }
            }
        }
    }

    pub fn negation(&self, operand: TypeId) -> TypeId {
        self.intern(TypeData::Negation(operand))
    }

    pub fn nominal(&self, decl: DeclId) -> TypeId {
        self.intern(TypeData::Nominal(decl))
    }

    /// Allocate a new template-variable binder named `name`.
    ///
    /// Every call returns a distinct type, even for the same name.
    pub fn fresh_variable(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        let var_id = {
            let mut variables = self.variables.write().expect("variables lock poisoned");
            let id = VarId(variables.len() as u32);
            variables.push(atom);
            id
        };
        self.intern(TypeData::Variable(var_id))
    }

    pub fn unresolved(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        self.intern(TypeData::Unresolved(atom))
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
