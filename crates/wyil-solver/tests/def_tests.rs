use super::*;
use crate::TypeInterner;
use crate::types::FieldInfo;

fn create_test_interner() -> TypeInterner {
    TypeInterner::new()
}

#[test]
fn test_decl_id_validity() {
    assert!(!DeclId::INVALID.is_valid());
    assert!(DeclId(1).is_valid());
    assert!(DeclId(100).is_valid());
}

#[test]
fn test_declaration_store_basic() {
    let interner = create_test_interner();
    let store = DeclarationStore::new();
    assert!(store.is_empty());

    let name = QualifiedName::simple(interner.intern_string("nat"));
    let where_clause = interner.intern_string("$ > 0");
    let info = DeclarationInfo::new(name.clone(), TypeId::INT).with_invariant(where_clause);

    let decl = store.register(info);
    assert!(decl.is_valid());
    assert!(store.contains(decl));
    assert_eq!(store.len(), 1);

    let retrieved = store.get(decl).expect("declaration exists");
    assert_eq!(retrieved.name, name);
    assert_eq!(retrieved.body, Some(TypeId::INT));
    assert_eq!(retrieved.invariants, vec![where_clause]);
}

#[test]
fn test_declare_then_define_recursive_body() {
    let interner = create_test_interner();
    let store = DeclarationStore::new();

    let node = store.declare(QualifiedName::simple(interner.intern_string("Node")));
    assert_eq!(store.get_body(node), None);

    let node_ty = interner.nominal(node);
    let body = interner.record(
        false,
        vec![
            FieldInfo::new(interner.intern_string("val"), TypeId::INT),
            FieldInfo::new(
                interner.intern_string("next"),
                interner.union2(node_ty, TypeId::NULL),
            ),
        ],
    );
    store.define(node, body);

    assert_eq!(store.get_body(node), Some(body));
    assert_eq!(store.concrete_type(node), Some(body));
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let interner = create_test_interner();
    let store = DeclarationStore::new();
    let a = store.declare(QualifiedName::simple(interner.intern_string("A")));
    let b = store.declare(QualifiedName::simple(interner.intern_string("A")));
    assert_ne!(a, b);
    assert!(b > a);
}

#[test]
fn test_invariants_accumulate() {
    let interner = create_test_interner();
    let store = DeclarationStore::new();
    let decl = store.declare(QualifiedName::simple(interner.intern_string("evens")));
    let first = interner.intern_string("$ >= 0");
    let second = interner.intern_string("$ % 2 == 0");
    store.add_invariant(decl, first);
    store.add_invariant(decl, second);
    assert_eq!(store.get_invariants(decl), Some(vec![first, second]));
}

#[test]
fn test_unknown_declaration() {
    let store = DeclarationStore::new();
    let missing = DeclId(42);
    assert!(!store.contains(missing));
    assert_eq!(store.get_body(missing), None);
    assert_eq!(store.get_name(missing), None);
    assert_eq!(store.get_invariants(missing), None);

    // Updates to unknown declarations are ignored.
    store.define(missing, TypeId::INT);
    assert!(store.is_empty());
}

#[test]
fn test_qualified_name_display() {
    let interner = create_test_interner();
    let std_ = interner.intern_string("std");
    let ascii = interner.intern_string("ascii");
    let string = interner.intern_string("string");

    let name = QualifiedName::new([std_, ascii, string]);
    assert_eq!(name.name(), string);
    assert_eq!(name.display(&interner.string_interner), "std::ascii::string");

    let store = DeclarationStore::new();
    let decl = store.declare(name.clone());
    assert_eq!(store.declaration_name(decl), Some(name));
}

#[test]
fn test_concurrent_declarations() {
    use std::sync::Arc;
    use std::thread;

    let interner = Arc::new(create_test_interner());
    let store = Arc::new(DeclarationStore::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let interner = Arc::clone(&interner);
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut ids = Vec::new();
                for j in 0..25 {
                    let name = interner.intern_string(&format!("T{i}_{j}"));
                    ids.push(store.register(DeclarationInfo::new(
                        QualifiedName::simple(name),
                        TypeId::INT,
                    )));
                }
                ids
            })
        })
        .collect();

    let mut all: Vec<DeclId> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("thread panicked"))
        .collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 100);
    assert_eq!(store.len(), 100);
}
