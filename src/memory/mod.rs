//! Long-term memory: registry-assigned identities and signature records.
//!
//! # Types
//!
//! - [`Registry`] / [`RegistryEntry`] - Externally supplied identity templates
//! - [`MemoryStore`] - All signatures ever registered
//! - [`MemoryEntry`] / [`MemoryId`] - One remembered object and its identity

pub mod registry;
pub mod store;

pub use registry::{Registry, RegistryEntry};
pub use store::{MemoryEntry, MemoryId, MemoryStore};
