//! Selector construction under an installed subscriber.

use crate::*;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    (result, output)
}

#[test]
fn test_cycle_is_logged() {
    let interner = TypeInterner::new();
    let decls = DeclarationStore::new();
    let lifetimes = StaticLifetimes::new(interner.intern_string(STATIC_LIFETIME));

    let mut lists = Vec::new();
    for name in ["Node", "Link"] {
        let decl = decls.declare(QualifiedName::simple(interner.intern_string(name)));
        let link = interner.nominal(decl);
        let body = interner.record(
            false,
            vec![
                FieldInfo::new(interner.intern_string("val"), TypeId::INT),
                FieldInfo::new(
                    interner.intern_string("next"),
                    interner.union2(link, TypeId::NULL),
                ),
            ],
        );
        decls.define(decl, body);
        lists.push(link);
    }

    let (sel, output) = captured(|| selector(&interner, &decls, lists[0], lists[1], &lifetimes));
    assert_eq!(sel, Selector::Top);
    assert!(output.contains("unfolding nominal"), "{output}");
    assert!(output.contains("pair already in progress"), "{output}");
    assert!(output.contains("selector computed"), "{output}");
}

#[test]
fn test_results_are_logged_with_display() {
    let interner = TypeInterner::new();
    let decls = DeclarationStore::new();
    let lifetimes = StaticLifetimes::new(interner.intern_string(STATIC_LIFETIME));
    let maybe_int = interner.union2(TypeId::INT, TypeId::NULL);

    let (sel, output) = captured(|| selector(&interner, &decls, maybe_int, TypeId::INT, &lifetimes));
    assert_eq!(sel.to_string(), "(top|bottom)");
    assert!(output.contains("result=(top|bottom)"), "{output}");
}
