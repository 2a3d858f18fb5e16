use std::collections::HashMap;
use std::sync::Arc;

use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::{Canvas, Coordinate};
use crate::foundation::error::TrackArtResult;
use crate::snapshot::provider::MapSnapshotProvider;

const XXH3_SEED: u64 = 0x5ca1_ab1e_7a3c_0de5;

/// Content address of a snapshot request: the exact coordinate sequence plus the pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    /// High half of the xxh3-128 digest.
    pub hi: u64,
    /// Low half of the xxh3-128 digest.
    pub lo: u64,
    /// Number of coordinates hashed.
    pub points: usize,
    /// Requested width.
    pub width: u32,
    /// Requested height.
    pub height: u32,
}

impl SnapshotKey {
    /// Fingerprint `coords` (bit-exact, order-sensitive) together with `width x height`.
    pub fn new(coords: &[Coordinate], width: u32, height: u32) -> Self {
        let mut h = Xxh3::with_seed(XXH3_SEED);
        h.update(&width.to_le_bytes());
        h.update(&height.to_le_bytes());
        h.update(&(coords.len() as u64).to_le_bytes());
        for c in coords {
            h.update(&c.lat.to_bits().to_le_bytes());
            h.update(&c.lon.to_bits().to_le_bytes());
        }
        let v = h.digest128();
        Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
            points: coords.len(),
            width,
            height,
        }
    }
}

/// Memo of provider results for the lifetime of its owner.
///
/// Failed fetches are not stored, so a later request retries the provider.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: HashMap<SnapshotKey, Arc<Canvas>>,
    hits: u64,
    misses: u64,
}

impl SnapshotCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snapshot for the request, fetching from `provider` on a miss.
    ///
    /// The flag is `true` when the result came from the cache.
    pub fn get_or_fetch(
        &mut self,
        provider: &mut dyn MapSnapshotProvider,
        coords: &[Coordinate],
        width: u32,
        height: u32,
    ) -> TrackArtResult<(Arc<Canvas>, bool)> {
        let key = SnapshotKey::new(coords, width, height);
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!(?key, provider = provider.name(), "snapshot cache hit");
            return Ok((Arc::clone(hit), true));
        }

        self.misses += 1;
        tracing::debug!(?key, provider = provider.name(), "snapshot cache miss");
        let snap = Arc::new(provider.snapshot(coords, width, height)?);
        self.entries.insert(key, Arc::clone(&snap));
        Ok((snap, false))
    }

    /// Whether a snapshot for this request is stored.
    pub fn contains(&self, coords: &[Coordinate], width: u32, height: u32) -> bool {
        self.entries
            .contains_key(&SnapshotKey::new(coords, width, height))
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that went to the provider.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every stored snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/cache.rs"]
mod tests;
