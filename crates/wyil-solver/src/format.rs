//! Type formatting for diagnostics and logs.
//!
//! Renders types in source syntax: `int[]`, `{int x, ...}`, `&l:int`,
//! `function(int)->(bool)`, `int|null`, `!null`, `a::b::Name`.
//! Nominal types are printed by name and never unfolded, so recursive types
//! format in finite space.

use crate::def::{DeclId, TypeResolver};
use crate::intern::TypeInterner;
use crate::types::{CallableShape, CallableKind, TypeData, TypeId};
use wyil_common::Atom;

/// Binding strength of a rendered type, loosest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Union,
    Intersection,
    Prefix,
    Postfix,
}

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
    resolver: Option<&'a dyn TypeResolver>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        Self {
            interner,
            resolver: None,
        }
    }

    /// Use `resolver` to print nominal types by qualified name.
    pub fn with_resolver(mut self, resolver: &'a dyn TypeResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write(&mut out, id, Precedence::Union);
        out
    }

    fn write(&self, out: &mut String, id: TypeId, context: Precedence) {
        let Some(data) = self.interner.lookup(id) else {
            out.push_str(&format!("<unknown #{}>", id.0));
            return;
        };

        match data {
            TypeData::Intrinsic(kind) => out.push_str(kind.keyword()),
            TypeData::Array(element) => {
                self.write(out, element, Precedence::Postfix);
                out.push_str("[]");
            }
            TypeData::Record(shape_id) => {
                let Some(shape) = self.interner.record_shape(shape_id) else {
                    out.push_str(&format!("<unknown record #{}>", shape_id.0));
                    return;
                };
                out.push('{');
                for (i, field) in shape.fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(out, field.type_id, Precedence::Union);
                    out.push(' ');
                    out.push_str(&self.interner.resolve_atom_ref(field.name));
                }
                if shape.is_open {
                    if !shape.fields.is_empty() {
                        out.push_str(", ");
                    }
                    out.push_str("...");
                }
                out.push('}');
            }
            TypeData::Reference(reference) => {
                self.wrapped(out, context, Precedence::Prefix, |out| {
                    out.push('&');
                    if let Some(lifetime) = reference.lifetime {
                        out.push_str(&self.interner.resolve_atom_ref(lifetime));
                        out.push(':');
                    }
                    self.write(out, reference.element, Precedence::Prefix);
                });
            }
            TypeData::Callable(shape_id) => {
                let Some(shape) = self.interner.callable_shape(shape_id) else {
                    out.push_str(&format!("<unknown callable #{}>", shape_id.0));
                    return;
                };
                self.wrapped(out, context, Precedence::Prefix, |out| {
                    self.write_callable(out, &shape);
                });
            }
            TypeData::Union(list_id) => {
                let Some(members) = self.interner.type_list(list_id) else {
                    out.push_str(&format!("<unknown union #{}>", list_id.0));
                    return;
                };
                self.wrapped(out, context, Precedence::Union, |out| {
                    self.write_joined(out, &members, "|", Precedence::Intersection);
                });
            }
            TypeData::Intersection(list_id) => {
                let Some(members) = self.interner.type_list(list_id) else {
                    out.push_str(&format!("<unknown intersection #{}>", list_id.0));
                    return;
                };
                self.wrapped(out, context, Precedence::Intersection, |out| {
                    self.write_joined(out, &members, "&", Precedence::Prefix);
                });
            }
            TypeData::Negation(operand) => {
                self.wrapped(out, context, Precedence::Prefix, |out| {
                    out.push('!');
                    self.write(out, operand, Precedence::Prefix);
                });
            }
            TypeData::Nominal(decl) => out.push_str(&self.nominal_name(decl)),
            TypeData::Variable(var_id) => match self.interner.variable_name(var_id) {
                Some(name) => out.push_str(&self.interner.resolve_atom_ref(name)),
                None => out.push_str(&format!("<var #{}>", var_id.0)),
            },
            TypeData::Unresolved(name) => {
                out.push('?');
                out.push_str(&self.interner.resolve_atom_ref(name));
            }
        }
    }

    /// Write `body`, parenthesised if it binds looser than `context` needs.
    fn wrapped(
        &self,
        out: &mut String,
        context: Precedence,
        own: Precedence,
        body: impl FnOnce(&mut String),
    ) {
        let parens = own < context;
        if parens {
            out.push('(');
        }
        body(out);
        if parens {
            out.push(')');
        }
    }

    fn write_joined(&self, out: &mut String, members: &[TypeId], sep: &str, context: Precedence) {
        for (i, &member) in members.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.write(out, member, context);
        }
    }

    fn write_callable(&self, out: &mut String, shape: &CallableShape) {
        out.push_str(shape.kind.keyword());
        if shape.kind == CallableKind::Method {
            if !shape.lifetime_params.is_empty() {
                out.push('<');
                self.write_atoms(out, &shape.lifetime_params);
                out.push('>');
            }
            if !shape.captured_lifetimes.is_empty() {
                out.push('[');
                self.write_atoms(out, &shape.captured_lifetimes);
                out.push(']');
            }
        }
        out.push('(');
        self.write_joined(out, &shape.params, ",", Precedence::Union);
        out.push_str(")->(");
        self.write_joined(out, &shape.returns, ",", Precedence::Union);
        out.push(')');
    }

    fn write_atoms(&self, out: &mut String, atoms: &[Atom]) {
        for (i, atom) in atoms.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&self.interner.resolve_atom_ref(*atom));
        }
    }

    fn nominal_name(&self, decl: DeclId) -> String {
        self.resolver
            .and_then(|resolver| resolver.declaration_name(decl))
            .map(|name| name.display(&self.interner.string_interner))
            .unwrap_or_else(|| format!("<decl #{}>", decl.0))
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
