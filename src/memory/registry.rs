//! Identity registry: externally supplied templates for new memories.
//!
//! The core does not recognize what a tracked object semantically *is*.
//! Instead the caller supplies a fixed, ordered list of identity templates
//! (name, display color tag, description), and each newly registered memory
//! is handed the next entry round-robin. The registry is immutable for the
//! lifetime of the pipeline.

use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// One identity template from the external registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Stable identifier within the registry.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color tag for the UI layer (e.g. "orange", "blue").
    pub color_tag: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional address-like metadata.
    #[serde(default)]
    pub address: Option<String>,
}

impl RegistryEntry {
    /// Create a minimal entry with just an id, name and color tag.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color_tag: color_tag.into(),
            description: None,
            address: None,
        }
    }
}

/// A fixed, non-empty, ordered list of identity templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Create a registry from a list of entries.
    ///
    /// # Errors
    /// Returns [`TrackerError::EmptyRegistry`] when the list is empty, since
    /// round-robin assignment needs at least one entry.
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self, TrackerError> {
        if entries.is_empty() {
            return Err(TrackerError::EmptyRegistry);
        }
        Ok(Self { entries })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a registry is non-empty by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a wrapping round-robin index.
    #[inline]
    pub fn cycle(&self, index: usize) -> &RegistryEntry {
        &self.entries[index % self.entries.len()]
    }

    /// All entries in order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }
}
