use super::*;

#[test]
fn test_intrinsics_have_fixed_ids() {
    let interner = TypeInterner::new();
    assert_eq!(interner.intrinsic(IntrinsicKind::Int), TypeId::INT);
    assert_eq!(interner.intern(TypeData::Intrinsic(IntrinsicKind::Null)), TypeId::NULL);
    assert_eq!(
        interner.lookup(TypeId::ANY),
        Some(TypeData::Intrinsic(IntrinsicKind::Any))
    );
    // Intrinsics are not stored in shards.
    assert!(interner.is_empty());
}

#[test]
fn test_structural_dedup() {
    let interner = TypeInterner::new();
    let a = interner.array(TypeId::INT);
    let b = interner.array(TypeId::INT);
    let c = interner.array(TypeId::BOOL);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.0 >= TypeId::FIRST_USER);
    assert_eq!(interner.lookup(a), Some(TypeData::Array(TypeId::INT)));
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize + 2);
}

#[test]
fn test_unknown_ids_do_not_resolve() {
    let interner = TypeInterner::new();
    assert_eq!(interner.lookup(TypeId::NONE), None);
    assert_eq!(interner.lookup(TypeId(50)), None);
    assert_eq!(interner.lookup(TypeId(TypeId::FIRST_USER + 12_345)), None);
}

#[test]
fn test_record_field_order_is_significant() {
    let interner = TypeInterner::new();
    let x = interner.intern_string("x");
    let y = interner.intern_string("y");

    let xy = interner.record(
        false,
        vec![FieldInfo::new(x, TypeId::INT), FieldInfo::new(y, TypeId::INT)],
    );
    let yx = interner.record(
        false,
        vec![FieldInfo::new(y, TypeId::INT), FieldInfo::new(x, TypeId::INT)],
    );
    let xy_open = interner.record(
        true,
        vec![FieldInfo::new(x, TypeId::INT), FieldInfo::new(y, TypeId::INT)],
    );

    assert_ne!(xy, yx);
    assert_ne!(xy, xy_open);

    let Some(TypeData::Record(shape_id)) = interner.lookup(xy_open) else {
        panic!("expected record");
    };
    let shape = interner.record_shape(shape_id).expect("record shape");
    assert!(shape.is_open);
    assert_eq!(shape.fields[0].name, x);
    assert_eq!(shape.fields[1].name, y);
}

#[test]
fn test_union_flattens_and_dedups_in_order() {
    let interner = TypeInterner::new();
    let int_null = interner.union2(TypeId::INT, TypeId::NULL);
    let nested = interner.union(vec![TypeId::BOOL, int_null, TypeId::INT]);

    let Some(TypeData::Union(list_id)) = interner.lookup(nested) else {
        panic!("expected union");
    };
    assert_eq!(
        interner.type_list(list_id).as_deref(),
        Some(&[TypeId::BOOL, TypeId::INT, TypeId::NULL][..])
    );
}

#[test]
fn test_union_degenerate_cases() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(Vec::new()), TypeId::VOID);
    assert_eq!(interner.union(vec![TypeId::INT]), TypeId::INT);
    assert_eq!(interner.union2(TypeId::INT, TypeId::INT), TypeId::INT);
    assert_eq!(interner.union2(TypeId::VOID, TypeId::BOOL), TypeId::BOOL);
    assert_eq!(interner.union2(TypeId::VOID, TypeId::VOID), TypeId::VOID);
}

#[test]
fn test_union_is_order_sensitive() {
    let interner = TypeInterner::new();
    let a = interner.union2(TypeId::INT, TypeId::NULL);
    let b = interner.union2(TypeId::NULL, TypeId::INT);
    assert_ne!(a, b);
}

#[test]
fn test_intersection_flattens_and_defaults_to_any() {
    let interner = TypeInterner::new();
    assert_eq!(interner.intersection(Vec::new()), TypeId::ANY);
    assert_eq!(interner.intersection(vec![TypeId::INT]), TypeId::INT);

    let not_null = interner.negation(TypeId::NULL);
    let inner = interner.intersection(vec![TypeId::INT, not_null]);
    let outer = interner.intersection(vec![inner, TypeId::INT, TypeId::ANY]);
    let Some(TypeData::Intersection(list_id)) = interner.lookup(outer) else {
        panic!("expected intersection");
    };
    assert_eq!(
        interner.type_list(list_id).as_deref(),
        Some(&[TypeId::INT, not_null, TypeId::ANY][..])
    );
}

#[test]
fn test_raw_intern_keeps_nested_unions() {
    let interner = TypeInterner::new();
    let inner = interner.union2(TypeId::INT, TypeId::NULL);
    let list = interner.intern_type_list(vec![inner, TypeId::BOOL]);
    let raw = interner.intern(TypeData::Union(list));

    assert_ne!(raw, interner.union(vec![inner, TypeId::BOOL]));
    assert_eq!(interner.type_list(list).as_deref(), Some(&[inner, TypeId::BOOL][..]));
}

#[test]
fn test_callable_kinds_are_distinct() {
    let interner = TypeInterner::new();
    let f = interner.function(vec![TypeId::INT], vec![TypeId::INT]);
    let p = interner.property(vec![TypeId::INT], vec![TypeId::INT]);
    let m = interner.method(vec![TypeId::INT], vec![TypeId::INT], Vec::new(), Vec::new());
    assert_ne!(f, p);
    assert_ne!(f, m);
    assert_ne!(p, m);

    let this = interner.intern_string("this");
    let l = interner.intern_string("l");
    let with_lifetimes = interner.method(vec![TypeId::INT], vec![TypeId::INT], vec![this], vec![l]);
    let Some(TypeData::Callable(shape_id)) = interner.lookup(with_lifetimes) else {
        panic!("expected callable");
    };
    let shape = interner.callable_shape(shape_id).expect("callable shape");
    assert_eq!(shape.kind, CallableKind::Method);
    assert_eq!(shape.captured_lifetimes, vec![this]);
    assert_eq!(shape.lifetime_params, vec![l]);
}

#[test]
fn test_references_keep_lifetime() {
    let interner = TypeInterner::new();
    let l = interner.intern_string("l");
    let static_ref = interner.reference(TypeId::INT, None);
    let lifetime_ref = interner.reference(TypeId::INT, Some(l));
    assert_ne!(static_ref, lifetime_ref);
    assert_eq!(
        interner.lookup(lifetime_ref),
        Some(TypeData::Reference(ReferenceShape {
            element: TypeId::INT,
            lifetime: Some(l),
        }))
    );
}

#[test]
fn test_fresh_variables_are_distinct_binders() {
    let interner = TypeInterner::new();
    let t1 = interner.fresh_variable("T");
    let t2 = interner.fresh_variable("T");
    assert_ne!(t1, t2);

    let Some(TypeData::Variable(var_id)) = interner.lookup(t1) else {
        panic!("expected variable");
    };
    assert_eq!(
        interner.variable_name(var_id),
        Some(interner.intern_string("T"))
    );
}

#[test]
fn test_nominal_and_unresolved() {
    let interner = TypeInterner::new();
    let a = interner.nominal(DeclId(1));
    assert_eq!(a, interner.nominal(DeclId(1)));
    assert_ne!(a, interner.nominal(DeclId(2)));

    let u = interner.unresolved("Missing");
    assert_eq!(
        interner.lookup(u),
        Some(TypeData::Unresolved(interner.intern_string("Missing")))
    );
}

#[test]
fn test_unknown_component_ids_are_absent() {
    let interner = TypeInterner::new();
    interner.record(false, Vec::new());

    assert!(interner.type_list(TypeListId(999)).is_none());
    assert!(interner.record_shape(RecordShapeId(999)).is_none());
    assert!(interner.callable_shape(CallableShapeId(0)).is_none());
    assert_eq!(interner.type_list(TypeListId(0)).as_deref(), Some(&[][..]));
}
