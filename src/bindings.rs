//! Recursion Through a Global Bindings Table
//!
//! The contrast case to [`crate::fixpoint`]: a callable that reaches
//! itself by looking its own name up in a process-wide mutable table at
//! every recursive call. The table must hold a valid binding for that
//! name at the moment of each lookup -- unbinding or rebinding the name
//! while calls are pending breaks the recursion, or silently routes it
//! to whatever value took the name over. That fragility is the point of
//! keeping this module around; it is documented, not mitigated.
//!
//! The mutex below makes the table memory-safe to touch from tests. It
//! does not make rebind-while-calling meaningful; interleavings remain
//! the caller's problem.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use crate::types::BindingError;

/// A callable installed in the global table.
///
/// Table-recursive callables return `Result` because any recursive
/// step can fail to resolve its own name.
pub type NamedCallable = Arc<dyn Fn(u64) -> Result<u64, BindingError> + Send + Sync>;

fn table() -> &'static Mutex<HashMap<String, NamedCallable>> {
    static TABLE: OnceLock<Mutex<HashMap<String, NamedCallable>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn locked() -> std::sync::MutexGuard<'static, HashMap<String, NamedCallable>> {
    // A poisoned lock still holds a usable table.
    table().lock().unwrap_or_else(|e| e.into_inner())
}

/// Bind `name` to `f`, replacing any previous binding.
pub fn bind(name: &str, f: NamedCallable) {
    debug!(name, "binding installed");
    locked().insert(name.to_string(), f);
}

/// Remove the binding for `name`. Returns whether one existed.
///
/// Callables already cloned out of the table keep their `Arc` and stay
/// callable; only their next lookup through the table fails.
pub fn unbind(name: &str) -> bool {
    debug!(name, "binding removed");
    locked().remove(name).is_some()
}

/// Resolve `name` to its current binding.
pub fn lookup(name: &str) -> Result<NamedCallable, BindingError> {
    locked()
        .get(name)
        .cloned()
        .ok_or_else(|| BindingError::Unbound {
            name: name.to_string(),
        })
}

/// Install a Fibonacci under `name` that recurses by looking `name` up
/// in the table on every recursive call.
///
/// The base cases never touch the table, so after an [`unbind`] an
/// aliased handle still answers `n <= 1` and fails on the first
/// genuinely recursive argument.
pub fn install_fib(name: &str) -> NamedCallable {
    let key = name.to_string();
    let f: NamedCallable = Arc::new(move |n| {
        if n == 0 || n == 1 {
            Ok(1)
        } else {
            let myself = lookup(&key)?;
            Ok(myself(n - 1)? + myself(n - 2)?)
        }
    });
    bind(name, Arc::clone(&f));
    f
}
