use super::*;
use crate::def::{DeclarationStore, QualifiedName};
use crate::types::FieldInfo;

fn fmt(interner: &TypeInterner, id: TypeId) -> String {
    TypeFormatter::new(interner).format(id)
}

#[test]
fn test_primitives() {
    let interner = TypeInterner::new();
    assert_eq!(fmt(&interner, TypeId::VOID), "void");
    assert_eq!(fmt(&interner, TypeId::NULL), "null");
    assert_eq!(fmt(&interner, TypeId::BOOL), "bool");
    assert_eq!(fmt(&interner, TypeId::BYTE), "byte");
    assert_eq!(fmt(&interner, TypeId::INT), "int");
    assert_eq!(fmt(&interner, TypeId::ANY), "any");
}

#[test]
fn test_arrays_and_records() {
    let interner = TypeInterner::new();
    let x = interner.intern_string("x");
    let y = interner.intern_string("y");

    assert_eq!(fmt(&interner, interner.array(TypeId::INT)), "int[]");
    assert_eq!(
        fmt(&interner, interner.array(interner.array(TypeId::BYTE))),
        "byte[][]"
    );

    let closed = interner.record(
        false,
        vec![FieldInfo::new(x, TypeId::INT), FieldInfo::new(y, TypeId::INT)],
    );
    assert_eq!(fmt(&interner, closed), "{int x, int y}");

    let open = interner.record(true, vec![FieldInfo::new(x, TypeId::INT)]);
    assert_eq!(fmt(&interner, open), "{int x, ...}");
    assert_eq!(fmt(&interner, interner.record(true, Vec::new())), "{...}");
}

#[test]
fn test_union_precedence() {
    let interner = TypeInterner::new();
    let maybe = interner.union2(TypeId::INT, TypeId::NULL);
    assert_eq!(fmt(&interner, maybe), "int|null");
    assert_eq!(fmt(&interner, interner.array(maybe)), "(int|null)[]");
    assert_eq!(fmt(&interner, interner.negation(maybe)), "!(int|null)");
    assert_eq!(
        fmt(&interner, interner.reference(maybe, None)),
        "&(int|null)"
    );

    let not_null = interner.negation(TypeId::NULL);
    let both = interner.intersection(vec![maybe, not_null]);
    assert_eq!(fmt(&interner, both), "(int|null)&!null");
    assert_eq!(
        fmt(&interner, interner.union2(both, TypeId::BOOL)),
        "(int|null)&!null|bool"
    );
}

#[test]
fn test_prefix_operands_in_arrays() {
    let interner = TypeInterner::new();
    let l = interner.intern_string("l");
    assert_eq!(
        fmt(&interner, interner.array(interner.negation(TypeId::INT))),
        "(!int)[]"
    );
    assert_eq!(
        fmt(&interner, interner.reference(interner.array(TypeId::INT), Some(l))),
        "&l:int[]"
    );
    assert_eq!(
        fmt(&interner, interner.array(interner.reference(TypeId::INT, None))),
        "(&int)[]"
    );
}

#[test]
fn test_callables() {
    let interner = TypeInterner::new();
    let this = interner.intern_string("this");
    let l = interner.intern_string("l");

    assert_eq!(
        fmt(&interner, interner.function(vec![TypeId::INT, TypeId::BOOL], vec![TypeId::INT])),
        "function(int,bool)->(int)"
    );
    assert_eq!(
        fmt(&interner, interner.property(Vec::new(), vec![TypeId::BOOL])),
        "property()->(bool)"
    );

    let l_ref = interner.reference(TypeId::INT, Some(l));
    assert_eq!(
        fmt(&interner, interner.method(vec![l_ref], Vec::new(), vec![this], vec![l])),
        "method<l>[this](&l:int)->()"
    );
    assert_eq!(
        fmt(
            &interner,
            interner.array(interner.function(Vec::new(), Vec::new()))
        ),
        "(function()->())[]"
    );
}

#[test]
fn test_nominal_names() {
    let interner = TypeInterner::new();
    let store = DeclarationStore::new();
    let path = ["std", "ascii", "string"].map(|s| interner.intern_string(s));
    let decl = store.declare(QualifiedName::new(path));
    let nominal = interner.nominal(decl);

    let with_names = TypeFormatter::new(&interner).with_resolver(&store);
    assert_eq!(with_names.format(nominal), "std::ascii::string");
    assert_eq!(
        with_names.format(interner.union2(nominal, TypeId::NULL)),
        "std::ascii::string|null"
    );
    assert_eq!(fmt(&interner, nominal), format!("<decl #{}>", decl.0));
}

#[test]
fn test_variables_and_placeholders() {
    let interner = TypeInterner::new();
    assert_eq!(fmt(&interner, interner.fresh_variable("T")), "T");
    assert_eq!(fmt(&interner, interner.unresolved("Missing")), "?Missing");
    assert_eq!(fmt(&interner, TypeId(TypeId::FIRST_USER + 777)), "<unknown #877>");
}
