//! Client interface to the external append-only registry of
//! (identity, face hash, content address) bindings.
//!
//! The registry enforces at most one entry per identity; this crate only
//! reads it, appends to it, and never assumes two sequential reads are
//! mutually consistent (the count may lag or lead the per-index reads).

mod error;
mod http;
mod memory;
mod registry;

pub use error::RegistryError;
pub use http::HttpRegistry;
pub use memory::MemoryRegistry;
pub use registry::{
    CommitReceipt, Enumeration, NewEntry, Registry, RegistryEntry, list_entries,
};
