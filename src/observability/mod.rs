//! Observability subsystem for trackql
//!
//! Structured JSON logging at the few points where the query core holds
//! side-band information worth surfacing: registry registration, snapshot
//! publication, and invariant breaches observed on the read path.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on query results
//! 2. Synchronous, no buffering, no background threads
//! 3. Deterministic output (one line per event, sorted keys)

mod logger;

pub use logger::{Logger, Severity};
