//! Knot -- Anonymous Recursion Demonstrations
//!
//! A function can call itself without being bound to a name in any
//! enclosing scope. [`fixpoint`] builds such a function with a
//! fixed-point combinator; [`bindings`] shows the fragile alternative
//! of recursing through a process-wide name table; [`persist`]
//! describes a recursive callable so a separate process invocation can
//! rebuild one with the same behavior.

pub mod types;
pub mod config;
pub mod fixpoint;
pub mod bindings;
pub mod persist;
pub mod demo;
