//! Selectors: the result of comparing a source type against a target type.
//!
//! A selector says which parts of a value of the source type are statically
//! known to satisfy the target (`Top`), which can never satisfy it
//! (`Bottom`), and, for the structured forms, which components need a
//! runtime type test. Structured selectors mirror the shape of the source:
//!
//! | Source shape | Selector |
//! |--------------|----------|
//! | `T[]` | `Array(element)` |
//! | `{T1 f1, .., Tn fn}` | `Record([s1, .., sn])` in declared field order |
//! | `T1|..|Tn` | `Union([s1, .., sn])` in alternative order |

use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Selector {
    /// Always a subtype; no runtime check needed.
    Top,
    /// Never a subtype; a runtime test must fail.
    Bottom,
    Array(Box<Selector>),
    Record(Vec<Selector>),
    Union(Vec<Selector>),
}

impl Selector {
    #[inline]
    pub fn is_top(&self) -> bool {
        matches!(self, Selector::Top)
    }

    #[inline]
    pub fn is_bottom(&self) -> bool {
        matches!(self, Selector::Bottom)
    }

    #[inline]
    pub fn is_structured(&self) -> bool {
        !self.is_top() && !self.is_bottom()
    }

    /// Whether deciding membership needs a runtime type test.
    ///
    /// Only structured selectors do: `Top` always passes and `Bottom` is
    /// rejected statically.
    pub fn requires_runtime_test(&self) -> bool {
        self.is_structured()
    }

    /// Child selectors of a structured selector; empty for `Top`/`Bottom`.
    pub fn children(&self) -> &[Selector] {
        match self {
            Selector::Top | Selector::Bottom => &[],
            Selector::Array(element) => std::slice::from_ref(element.as_ref()),
            Selector::Record(items) | Selector::Union(items) => items,
        }
    }

    /// Array selector for an element selector; `Top`/`Bottom` pass through.
    pub(crate) fn array_of(element: Selector) -> Selector {
        match element {
            Selector::Top | Selector::Bottom => element,
            structured => Selector::Array(Box::new(structured)),
        }
    }

    /// Union selector over per-alternative selectors, collapsed when uniform.
    pub(crate) fn union_of(items: Vec<Selector>) -> Selector {
        if all_bottom(&items) {
            Selector::Bottom
        } else if all_top(&items) {
            Selector::Top
        } else {
            Selector::Union(items)
        }
    }

    /// Record selector over per-field selectors, collapsed when uniform.
    pub(crate) fn record_of(items: Vec<Selector>) -> Selector {
        if all_top(&items) {
            Selector::Top
        } else if all_bottom(&items) {
            Selector::Bottom
        } else {
            Selector::Record(items)
        }
    }
}

fn all_top(items: &[Selector]) -> bool {
    items.iter().all(Selector::is_top)
}

fn all_bottom(items: &[Selector]) -> bool {
    items.iter().all(Selector::is_bottom)
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Top => f.write_str("top"),
            Selector::Bottom => f.write_str("bottom"),
            Selector::Array(element) => write!(f, "[{element}]"),
            Selector::Record(items) => {
                f.write_str("{")?;
                write_separated(f, items, ", ")?;
                f.write_str("}")
            }
            Selector::Union(items) => {
                f.write_str("(")?;
                write_separated(f, items, "|")?;
                f.write_str(")")
            }
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Selector], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
