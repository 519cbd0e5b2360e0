//! # Entity Capability Contracts
//!
//! Pooled entity types declare what the pool may do with them:
//! - Lifecycle hooks fired on spawn and despawn (default to no-ops)
//! - World presence toggling, required only by dormant-clone pools

/// Contract for types that can live in an [`EntityPool`](crate::EntityPool).
///
/// Both hooks default to empty bodies, so the minimal implementation is a
/// one-liner:
///
/// ```rust,ignore
/// struct Projectile { heading: [f32; 3] }
/// impl PoolEntity for Projectile {}
/// ```
///
/// A type that wants lifecycle notifications overrides the hooks. The pool
/// never resets application-level state itself - reinitialization belongs in
/// [`on_spawn`](PoolEntity::on_spawn) or in caller code.
pub trait PoolEntity: 'static {
    /// Called by the pool after this entity has been recorded as active.
    ///
    /// The pool's bookkeeping is already consistent when the hook runs: the
    /// entity is counted active and its handle has been minted.
    fn on_spawn(&mut self) {}

    /// Called by the pool after this entity has been returned to the free
    /// stack.
    fn on_despawn(&mut self) {}
}

/// Externally visible presence of an entity in the host world.
///
/// Required by [`EntityPool::of_dormant_clones`](crate::EntityPool::of_dormant_clones):
/// freshly duplicated instances are taken out of the world
/// (`set_present(false)`) before they enter the free stack, so entities
/// sitting in a pool are never visibly live until spawned.
pub trait WorldPresence {
    /// Shows or hides the entity in the host world.
    ///
    /// # Arguments
    ///
    /// * `present` - `true` to make the entity visible/enabled, `false` to
    ///   hide and disable it
    fn set_present(&mut self, present: bool);
}
