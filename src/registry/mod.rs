//! Field capability registry for trackql
//!
//! Maps a field id to its capability descriptor: group, display key and
//! the indexers that know how the field's values land in the inverted
//! index. The registry is an explicit context object handed to the
//! sanitizer and translator, never a process-global.
//!
//! # Design Principles
//!
//! - System fields register a fixed indexer set at load time
//! - Custom fields register a live resolver closure re-queried on every
//!   lookup, with a static fallback set as the safety net (a custom field
//!   type may not be able to self-describe mid-initialization)
//! - Registration is serialized behind a single writer lock; lookups are
//!   lock-read only

mod capability;
mod errors;
mod registry;
mod renderer;

pub use capability::{FieldCapability, FieldGroup, IndexedKind, Indexer, IndexerResolver};
pub use errors::{RegistryError, RegistryResult};
pub use registry::FieldRegistry;
pub use renderer::{RendererKind, RendererOverrides};
