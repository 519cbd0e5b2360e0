//! # Pool Handles
//!
//! Handles are lightweight tickets for spawned entities consisting of:
//! - An index into the pool's slot storage
//! - A generation counter for safe slot reuse

/// Ticket for an entity spawned from an [`EntityPool`](crate::EntityPool).
///
/// The handle is split into two parts:
/// - Lower 32 bits: Index into the pool's slot storage
/// - Upper 32 bits: Generation counter for detecting stale handles
///
/// A handle is only meaningful to the pool that minted it. Once the entity is
/// despawned the handle goes stale: `despawn` rejects it and `get`/`get_mut`
/// return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PoolHandle(u64);

impl PoolHandle {
    /// Creates a new handle from index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The index into the pool's slot storage (0 to 2^32-1)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the handle.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}
