//! Comparison rules, split by the shape they handle.
//!
//! Each file extends `SelectorBuilder` with the rules for one group of
//! shapes. Recursion always goes back through `SelectorBuilder::construct`
//! so that every nested pair passes the recursion guard.

mod atoms;
mod nominals;
mod unions;
