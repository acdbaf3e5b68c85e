//! Knot - Type Definitions
//!
//! Shared types for the recursion demonstrations: the snapshot envelope
//! written by the persistence demo, the demo configuration, and the
//! crate's error enums.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Snapshot Envelope ───────────────────────────────────────────

/// A serialized description of a recursive callable.
///
/// The envelope never contains closure state. It records only what is
/// needed to re-derive the callable in another process: which template
/// the behavior comes from and which construction ties its knot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCallable {
    pub format_version: u32,
    pub snapshot_id: String,
    pub saved_at: String,
    pub template: TemplateKind,
    pub shape: CombinatorShape,
}

/// Which template the callable's behavior is derived from.
///
/// `Named` is a plain `fn` item; `Literal` is a closure expression with
/// no name of its own. Both compute the same sequence, but only the
/// named form can recurse through its own name.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Named,
    Literal,
}

/// How the revived callable reaches itself.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CombinatorShape {
    /// Self-application through the fixed-point combinator.
    SelfApplied,
    /// Ordinary named recursion, no combinator involved.
    Direct,
}

// ─── Configuration ───────────────────────────────────────────────

/// Demo configuration, loaded from `~/.knot/knot.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    /// Largest `n` printed by the combinator demonstration.
    #[serde(default = "default_fixpoint_upper")]
    pub fixpoint_upper: u64,
    /// Largest `n` printed by the global-bindings demonstration.
    #[serde(default = "default_lookup_upper")]
    pub lookup_upper: u64,
    /// Largest `n` printed by the save/load demonstrations.
    #[serde(default = "default_snapshot_upper")]
    pub snapshot_upper: u64,
    /// Default snapshot location when `--save`/`--load` carry no path.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

fn default_fixpoint_upper() -> u64 {
    8
}

fn default_lookup_upper() -> u64 {
    6
}

fn default_snapshot_upper() -> u64 {
    6
}

fn default_snapshot_path() -> String {
    "~/.knot/fib.json".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Returns the default `DemoConfig` used when no config file exists.
pub fn default_config() -> DemoConfig {
    DemoConfig {
        fixpoint_upper: default_fixpoint_upper(),
        lookup_upper: default_lookup_upper(),
        snapshot_upper: default_snapshot_upper(),
        snapshot_path: default_snapshot_path(),
        log_level: default_log_level(),
    }
}

// ─── Errors ──────────────────────────────────────────────────────

/// Failure of a name lookup in the global bindings table.
///
/// This is the documented hazard of recursion-by-global-name: the table
/// must hold a valid binding at the moment of every recursive call, and
/// nothing restores one that has been removed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("no binding named `{name}` in the global table")]
    Unbound { name: String },
}

/// Failure while writing, reading, or reviving a snapshot.
///
/// Every variant is terminal to the invocation that hit it.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access snapshot at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not a valid callable description")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot format v{found} is newer than supported v{supported}")]
    Incompatible { found: u32, supported: u32 },
    #[error("a literal template has no name to recurse through")]
    UnnameableTemplate,
}
