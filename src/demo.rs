//! Demonstration Runs
//!
//! Each run prints computed values one per line to stdout, with a
//! literal `===` line between phases. Diagnostics go to tracing, never
//! to stdout, so the printed sequences stay clean.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::bindings;
use crate::fixpoint::{fib_template, fix};
use crate::persist;
use crate::types::{BindingError, CombinatorShape, PersistError, TemplateKind};

const PHASE_SEPARATOR: &str = "===";

/// The combinator demonstration.
///
/// Phase one prints the sequence through the callable returned by
/// `fix`. Phase two moves it into an alias -- the original binding is
/// gone after the move -- and replays the range to show the recursion
/// never depended on the name.
pub fn fixpoint_demo(upper: u64) {
    info!(upper, "running the fixed-point demonstration");

    let fib = fix(fib_template);
    for n in 0..=upper {
        println!("{}", fib(n));
    }
    println!("{}", PHASE_SEPARATOR);

    let foo = fib;
    for n in 0..=upper {
        println!("{}", foo(n));
    }
    println!("{}", PHASE_SEPARATOR);
}

/// The global-bindings demonstration, hazard included.
///
/// Phase one installs `fib` in the table and prints the sequence.
/// Phase two keeps an aliased handle, removes the binding, and replays
/// the range: the base cases still print, then the first recursive
/// call fails to resolve its own name and the error propagates out.
/// This run is expected to end in `BindingError::Unbound`.
pub fn lookup_demo(upper: u64) -> Result<(), BindingError> {
    info!(upper, "running the global-bindings demonstration");

    let fib = bindings::install_fib("fib");
    for n in 0..=upper {
        println!("{}", fib(n)?);
    }
    println!("{}", PHASE_SEPARATOR);

    let foo = Arc::clone(&fib);
    drop(fib);
    bindings::unbind("fib");

    for n in 0..=upper {
        println!("{}", foo(n)?);
    }
    println!("{}", PHASE_SEPARATOR);
    Ok(())
}

/// The persistence demonstration, write side.
///
/// Prints the sequence computed by the callable that is about to be
/// described, then writes its snapshot. The named template persists as
/// plain named recursion; the literal template has no name and
/// persists as a combinator construction.
pub fn save_demo(path: &Path, template: TemplateKind, upper: u64) -> Result<(), PersistError> {
    info!(path = %path.display(), ?template, "writing callable snapshot");

    let shape = match template {
        TemplateKind::Named => CombinatorShape::Direct,
        TemplateKind::Literal => CombinatorShape::SelfApplied,
    };
    let saved = persist::snapshot(template, shape);

    let fib = persist::revive(&saved)?;
    for n in 0..=upper {
        println!("{}", fib(n));
    }
    println!("{}", PHASE_SEPARATOR);

    persist::save(path, &saved)?;
    println!("{}", PHASE_SEPARATOR);
    Ok(())
}

/// The persistence demonstration, read side.
///
/// Reconstructs the callable from the snapshot file alone and prints
/// the sequence, then drops it and reconstructs a second time under a
/// different local name. The file is the only input either time.
pub fn load_demo(path: &Path, upper: u64) -> Result<(), PersistError> {
    info!(path = %path.display(), "reviving callable snapshot");

    let fib = persist::revive(&persist::load(path)?)?;
    for n in 0..=upper {
        println!("{}", fib(n));
    }
    println!("{}", PHASE_SEPARATOR);
    drop(fib);

    let user_supplied = persist::revive(&persist::load(path)?)?;
    for n in 0..=upper {
        println!("{}", user_supplied(n));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("knot-demo-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_fixpoint_demo_completes() {
        fixpoint_demo(8);
    }

    #[test]
    fn test_lookup_demo_ends_in_unbound() {
        let err = lookup_demo(6).unwrap_err();
        assert_eq!(
            err,
            BindingError::Unbound {
                name: "fib".to_string()
            }
        );
    }

    #[test]
    fn test_save_then_load_demo() {
        let path = scratch_path();
        save_demo(&path, TemplateKind::Named, 6).unwrap();
        load_demo(&path, 6).unwrap();
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_load_demo_literal() {
        let path = scratch_path();
        save_demo(&path, TemplateKind::Literal, 6).unwrap();
        load_demo(&path, 6).unwrap();
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_demo_without_snapshot_fails() {
        let err = load_demo(Path::new("/nonexistent/knot.json"), 6).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }
}
