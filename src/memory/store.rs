//! Long-term memory store.
//!
//! Every object the pipeline has ever recognized gets one [`MemoryEntry`]:
//! a stable identity, the registry entry assigned at creation, the
//! accumulated signature, and recency/hit-count bookkeeping. Entries are
//! never deleted during normal operation — memory is process-lifetime until
//! an explicit reset — so an object can reappear minutes later and still
//! match its record.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::signature::ObjectSignature;
use crate::types::Observation;

use super::registry::{Registry, RegistryEntry};

/// Stable identity of one remembered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MemoryId(Uuid);

impl MemoryId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One remembered object: identity, assigned registry entry, signature and
/// bookkeeping.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// Stable unique identity.
    pub id: MemoryId,
    /// Registry entry assigned round-robin at creation; immutable afterwards.
    pub registry_entry: RegistryEntry,
    /// Accumulated statistical fingerprint.
    pub signature: ObjectSignature,
    /// When this memory last matched an observation.
    pub last_seen: Instant,
    /// How many times this memory has been associated (starts at 1).
    pub match_count: u32,
}

/// The set of all signatures ever registered.
///
/// Iteration order is registration order, which makes the best-match
/// tie-break (first strict maximum wins) deterministic.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Vec<MemoryEntry>,
    registry: Registry,
    next_registry_index: usize,
}

impl MemoryStore {
    /// Create an empty store drawing identities from `registry`.
    pub fn new(registry: Registry) -> Self {
        Self {
            entries: Vec::new(),
            registry,
            next_registry_index: 0,
        }
    }

    /// Number of registered memories.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no memories are registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: MemoryId) -> Option<&MemoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Find the best-scoring memory for an observation.
    ///
    /// Scans all entries not in `exclude` in registration order and returns
    /// the id of the entry with the highest similarity, provided that score
    /// strictly exceeds `min_similarity`. On exact ties the
    /// first-registered entry wins.
    pub fn find_best_match(
        &self,
        obs: &Observation,
        exclude: &[MemoryId],
        min_similarity: f32,
    ) -> Option<MemoryId> {
        let mut best_score = min_similarity;
        let mut best: Option<&MemoryEntry> = None;

        for entry in &self.entries {
            if exclude.contains(&entry.id) {
                continue;
            }
            let score = entry.signature.similarity(obs);
            if score > best_score {
                best_score = score;
                best = Some(entry);
            }
        }

        if let Some(entry) = best {
            debug!(
                memory_id = %entry.id,
                name = %entry.registry_entry.name,
                score = best_score,
                "memory matched"
            );
        }

        best.map(|entry| entry.id)
    }

    /// Register a brand-new memory for an observation. Never fails.
    ///
    /// The next registry entry is assigned round-robin and the signature
    /// starts with degenerate ranges at the observation's values.
    pub fn register(&mut self, obs: &Observation, now: Instant) -> MemoryId {
        let registry_entry = self.registry.cycle(self.next_registry_index).clone();
        self.next_registry_index += 1;

        let entry = MemoryEntry {
            id: MemoryId::generate(),
            registry_entry,
            signature: ObjectSignature::from_observation(obs),
            last_seen: now,
            match_count: 1,
        };

        info!(
            memory_id = %entry.id,
            name = %entry.registry_entry.name,
            x = obs.center.x,
            y = obs.center.y,
            aspect_ratio = obs.aspect_ratio,
            size = obs.size,
            distance = obs.real_distance,
            "registered new memory"
        );

        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Record a stage-2 re-association: fold the observation into the
    /// signature, refresh recency and bump the match count.
    pub fn record_match(&mut self, id: MemoryId, obs: &Observation, now: Instant) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.signature.update(obs);
            entry.last_seen = now;
            entry.match_count += 1;
        }
    }

    /// Record a stage-1 continuity sighting: signature and recency only.
    /// Overlap continuity does not count as a re-association, so the match
    /// count stays put.
    pub fn record_sighting(&mut self, id: MemoryId, obs: &Observation, now: Instant) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.signature.update(obs);
            entry.last_seen = now;
        }
    }

    /// Forget everything and restart round-robin assignment from the first
    /// registry entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_registry_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::registry::RegistryEntry;
    use nalgebra::Point2;

    fn registry() -> Registry {
        Registry::new(vec![
            RegistryEntry::new("a", "Alpha Tower", "orange"),
            RegistryEntry::new("b", "Beta Plaza", "blue"),
        ])
        .unwrap()
    }

    fn obs(x: f32, y: f32) -> Observation {
        Observation {
            aspect_ratio: 1.0,
            size: 0.05,
            center: Point2::new(x, y),
            real_distance: None,
            color: None,
        }
    }

    #[test]
    fn test_round_robin_assignment_wraps() {
        let now = Instant::now();
        let mut store = MemoryStore::new(registry());

        let ids: Vec<_> = (0..3).map(|i| store.register(&obs(0.1 * i as f32, 0.5), now)).collect();
        let names: Vec<_> = ids
            .iter()
            .map(|&id| store.get(id).unwrap().registry_entry.name.clone())
            .collect();

        assert_eq!(names, ["Alpha Tower", "Beta Plaza", "Alpha Tower"]);
    }

    #[test]
    fn test_find_best_match_requires_strictly_above_threshold() {
        let now = Instant::now();
        let mut store = MemoryStore::new(registry());
        let id = store.register(&obs(0.5, 0.5), now);

        // Identical observation: similarity 1.0, clears the bar.
        assert_eq!(store.find_best_match(&obs(0.5, 0.5), &[], 0.45), Some(id));
        // A threshold at the exact score must NOT match.
        assert_eq!(store.find_best_match(&obs(0.5, 0.5), &[], 1.0), None);
    }

    #[test]
    fn test_find_best_match_prefers_higher_score() {
        let now = Instant::now();
        let mut store = MemoryStore::new(registry());
        let far = store.register(&obs(0.9, 0.9), now);
        let near = store.register(&obs(0.5, 0.5), now);

        assert_eq!(store.find_best_match(&obs(0.51, 0.5), &[], 0.45), Some(near));
        assert_eq!(store.find_best_match(&obs(0.89, 0.9), &[], 0.45), Some(far));
    }

    #[test]
    fn test_find_best_match_honors_exclusions() {
        let now = Instant::now();
        let mut store = MemoryStore::new(registry());
        let first = store.register(&obs(0.5, 0.5), now);
        let second = store.register(&obs(0.5, 0.5), now);

        assert_eq!(store.find_best_match(&obs(0.5, 0.5), &[first], 0.45), Some(second));
        assert_eq!(store.find_best_match(&obs(0.5, 0.5), &[first, second], 0.45), None);
    }

    #[test]
    fn test_exact_tie_keeps_first_registered() {
        let now = Instant::now();
        let mut store = MemoryStore::new(registry());
        let first = store.register(&obs(0.5, 0.5), now);
        let _second = store.register(&obs(0.5, 0.5), now);

        // Both signatures are identical, so scores tie exactly.
        assert_eq!(store.find_best_match(&obs(0.5, 0.5), &[], 0.45), Some(first));
    }

    #[test]
    fn test_match_count_bookkeeping() {
        let t0 = Instant::now();
        let t1 = t0 + std::time::Duration::from_millis(100);
        let mut store = MemoryStore::new(registry());
        let id = store.register(&obs(0.5, 0.5), t0);
        assert_eq!(store.get(id).unwrap().match_count, 1);

        store.record_sighting(id, &obs(0.5, 0.5), t1);
        assert_eq!(store.get(id).unwrap().match_count, 1);
        assert_eq!(store.get(id).unwrap().last_seen, t1);

        store.record_match(id, &obs(0.5, 0.5), t1);
        assert_eq!(store.get(id).unwrap().match_count, 2);
    }

    #[test]
    fn test_clear_restarts_round_robin() {
        let now = Instant::now();
        let mut store = MemoryStore::new(registry());
        store.register(&obs(0.1, 0.1), now);
        store.register(&obs(0.2, 0.2), now);

        store.clear();
        assert!(store.is_empty());

        let id = store.register(&obs(0.3, 0.3), now);
        assert_eq!(store.get(id).unwrap().registry_entry.name, "Alpha Tower");
    }
}
