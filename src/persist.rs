//! Callable Snapshots
//!
//! Writes and reads the JSON description of a recursive callable so a
//! separate process invocation can reconstruct one with equivalent
//! behavior. Rust cannot serialize closures, and nothing here tries:
//! the snapshot is a re-derivable description (template identity plus
//! combinator shape), which is exactly the representation an external
//! value serializer would capture by value. A combinator-built callable
//! depends on nothing else -- no open handle, no address, no global
//! binding -- so the description is complete.

use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::fixpoint::{fib_template, fix, Callable};
use crate::types::{CombinatorShape, PersistError, SavedCallable, TemplateKind};

/// Current snapshot format version. Readers reject anything newer.
pub const FORMAT_VERSION: u32 = 1;

/// Describe a callable for persistence, stamped with a fresh id and
/// the current time.
pub fn snapshot(template: TemplateKind, shape: CombinatorShape) -> SavedCallable {
    SavedCallable {
        format_version: FORMAT_VERSION,
        snapshot_id: Uuid::new_v4().to_string(),
        saved_at: Utc::now().to_rfc3339(),
        template,
        shape,
    }
}

/// Write a snapshot to `path` as pretty-printed JSON.
pub fn save(path: &Path, saved: &SavedCallable) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(saved)?;
    fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), id = %saved.snapshot_id, "snapshot written");
    Ok(())
}

/// Read a snapshot back from `path`.
///
/// Fails on a missing or unreadable file, on malformed JSON, and on a
/// format version newer than this build understands. All three are
/// terminal; there is no partial recovery.
pub fn load(path: &Path) -> Result<SavedCallable, PersistError> {
    let contents = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let saved: SavedCallable = serde_json::from_str(&contents)?;

    if saved.format_version > FORMAT_VERSION {
        return Err(PersistError::Incompatible {
            found: saved.format_version,
            supported: FORMAT_VERSION,
        });
    }

    Ok(saved)
}

/// The named-recursion form of the demonstration function.
fn fib_by_name(n: u64) -> u64 {
    if n == 0 || n == 1 {
        1
    } else {
        fib_by_name(n - 1) + fib_by_name(n - 2)
    }
}

/// Rebuild a callable from its description.
///
/// The snapshot carries no state, so revival is pure construction:
/// either the named `fn` item recursing through its own name, or the
/// combinator applied to the recorded template. A literal template has
/// no name, so the `Direct` shape cannot be revived from it.
pub fn revive(saved: &SavedCallable) -> Result<Box<dyn Fn(u64) -> u64>, PersistError> {
    match (saved.template, saved.shape) {
        (TemplateKind::Named, CombinatorShape::Direct) => Ok(Box::new(fib_by_name)),
        (TemplateKind::Named, CombinatorShape::SelfApplied) => Ok(Box::new(fix(fib_template))),
        (TemplateKind::Literal, CombinatorShape::SelfApplied) => {
            Ok(Box::new(fix(|rec: &dyn Callable<u64, u64>, n: u64| {
                if n == 0 || n == 1 {
                    1
                } else {
                    rec.call(n - 1) + rec.call(n - 2)
                }
            })))
        }
        (TemplateKind::Literal, CombinatorShape::Direct) => Err(PersistError::UnnameableTemplate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("knot-test-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_round_trip_named() {
        let path = scratch_path();
        let saved = snapshot(TemplateKind::Named, CombinatorShape::Direct);
        save(&path, &saved).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.snapshot_id, saved.snapshot_id);
        assert_eq!(loaded.template, TemplateKind::Named);

        let live = revive(&saved).unwrap();
        let revived = revive(&loaded).unwrap();
        for n in 0..=6 {
            assert_eq!(revived(n), live(n));
        }

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_round_trip_literal() {
        let path = scratch_path();
        let saved = snapshot(TemplateKind::Literal, CombinatorShape::SelfApplied);
        save(&path, &saved).unwrap();

        let revived = revive(&load(&path).unwrap()).unwrap();
        let reference = fix(fib_template);
        for n in 0..=6 {
            assert_eq!(revived(n), reference(n));
        }

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/knot.json")).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_snapshot() {
        let path = scratch_path();
        fs::write(&path, "not a snapshot").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, PersistError::Malformed(_)));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_future_format_version() {
        let path = scratch_path();
        let mut saved = snapshot(TemplateKind::Named, CombinatorShape::Direct);
        saved.format_version = FORMAT_VERSION + 1;
        save(&path, &saved).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Incompatible { found, supported }
                if found == FORMAT_VERSION + 1 && supported == FORMAT_VERSION
        ));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_literal_cannot_revive_direct() {
        let saved = snapshot(TemplateKind::Literal, CombinatorShape::Direct);
        let err = match revive(&saved) {
            Ok(_) => panic!("expected revive to fail"),
            Err(e) => e,
        };
        assert!(matches!(err, PersistError::UnnameableTemplate));
    }

    #[test]
    fn test_revived_shapes_agree() {
        let by_name = revive(&snapshot(TemplateKind::Named, CombinatorShape::Direct)).unwrap();
        let by_knot =
            revive(&snapshot(TemplateKind::Named, CombinatorShape::SelfApplied)).unwrap();
        for n in 0..=8 {
            assert_eq!(by_name(n), by_knot(n));
        }
    }
}
