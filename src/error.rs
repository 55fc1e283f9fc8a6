//! Error types shared across the mining core.
//!
//! `OdsgError` covers the recoverable failure modes named by the core: bad
//! input files, malformed lines, and mining requested on graphs that are
//! not yet in a valid state. Broken invariants (DAG cycles, asymmetric
//! parent/child links, a missing traveling-next on a non-root) are not
//! represented here — those are programmer errors and surface as
//! `debug_assert!`/`unreachable!` panics at the point of violation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OdsgError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("line {line}: {detail}")]
    MalformedInput { line: usize, detail: String },

    #[error("invalid state: {0}")]
    InvalidState(String),
}
