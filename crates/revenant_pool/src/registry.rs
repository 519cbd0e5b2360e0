//! # Pool Registry
//!
//! Exactly one recycling pool per entity type, looked up by `TypeId`.
//!
//! The registry stores pools of differing entity types behind a type-erased
//! trait and downcasts to the typed pool at the point of use. Registration is
//! type-safe, so a failed downcast can only mean registry corruption and is
//! treated as an internal invariant violation.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::entity::PoolEntity;
use crate::error::{PoolError, PoolResult};
use crate::handle::PoolHandle;
use crate::pool::EntityPool;

/// Type-independent surface of a registered pool.
trait AnyPool {
    /// Despawns every active entity in the pool.
    fn despawn_all_entities(&mut self) -> usize;

    /// Upcast for typed borrows.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed borrows.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Boxed upcast for removal.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Name of the pooled entity type.
    fn entity_type_name(&self) -> &'static str;
}

impl<T: PoolEntity> AnyPool for EntityPool<T> {
    fn despawn_all_entities(&mut self) -> usize {
        self.despawn_all()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn entity_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Message for the downcast that registration keying makes infallible.
const KEYED_BY_TYPE: &str = "Registry entry must hold the pool of its key type";

/// Registry holding exactly one [`EntityPool`] per entity type.
///
/// Entries are created only by [`add_pool`](PoolRegistry::add_pool) and
/// removed only by [`remove_pool`](PoolRegistry::remove_pool); the typed
/// operations delegate to the registered pool and fail if none exists.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = PoolRegistry::new();
/// registry.add_pool(EntityPool::with_factory(64, Projectile::default))?;
///
/// let shot = registry.spawn::<Projectile>()?;
/// registry.despawn::<Projectile>(shot)?;
/// ```
#[derive(Default)]
pub struct PoolRegistry {
    /// Registered pools, keyed by entity type.
    pools: HashMap<TypeId, Box<dyn AnyPool>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Registers `pool` as the sole pool for entity type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AlreadyRegistered`] if a pool for `T` exists; the
    /// existing registration is left untouched. Silent replacement would
    /// orphan every entity still active in the previous pool.
    pub fn add_pool<T: PoolEntity>(&mut self, pool: EntityPool<T>) -> PoolResult<()> {
        let key = TypeId::of::<T>();
        if self.pools.contains_key(&key) {
            return Err(PoolError::AlreadyRegistered {
                type_name: std::any::type_name::<T>(),
            });
        }

        tracing::debug!(
            entity = std::any::type_name::<T>(),
            pre_warmed = pool.free_count(),
            "pool registered"
        );
        self.pools.insert(key, Box::new(pool));

        Ok(())
    }

    /// Removes and returns the pool registered for entity type `T`.
    ///
    /// A no-op returning `None` if no pool is registered. Entities still
    /// active in the pool are not despawned - eviction before removal is the
    /// caller's responsibility.
    pub fn remove_pool<T: PoolEntity>(&mut self) -> Option<EntityPool<T>> {
        let erased = self.pools.remove(&TypeId::of::<T>())?;
        tracing::debug!(entity = erased.entity_type_name(), "pool removed");

        let pool = erased
            .into_any()
            .downcast::<EntityPool<T>>()
            .unwrap_or_else(|_| unreachable!("{KEYED_BY_TYPE}"));
        Some(*pool)
    }

    /// Checks whether a pool is registered for entity type `T`.
    #[must_use]
    pub fn has_pool<T: PoolEntity>(&self) -> bool {
        self.has_pool_by_id(TypeId::of::<T>())
    }

    /// Checks whether a pool is registered for an explicit type identifier.
    ///
    /// # Arguments
    ///
    /// * `entity_type` - `TypeId` of the pooled entity type
    #[must_use]
    pub fn has_pool_by_id(&self, entity_type: TypeId) -> bool {
        self.pools.contains_key(&entity_type)
    }

    /// Borrows the pool registered for entity type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotRegistered`] if no pool is registered.
    pub fn pool<T: PoolEntity>(&self) -> PoolResult<&EntityPool<T>> {
        let erased = self
            .pools
            .get(&TypeId::of::<T>())
            .ok_or_else(not_registered::<T>)?;

        Ok(erased
            .as_any()
            .downcast_ref::<EntityPool<T>>()
            .unwrap_or_else(|| unreachable!("{KEYED_BY_TYPE}")))
    }

    /// Mutably borrows the pool registered for entity type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotRegistered`] if no pool is registered.
    pub fn pool_mut<T: PoolEntity>(&mut self) -> PoolResult<&mut EntityPool<T>> {
        let erased = self
            .pools
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(not_registered::<T>)?;

        Ok(erased
            .as_any_mut()
            .downcast_mut::<EntityPool<T>>()
            .unwrap_or_else(|| unreachable!("{KEYED_BY_TYPE}")))
    }

    /// Spawns an entity from the pool registered for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotRegistered`] if no pool is registered, or any
    /// error of [`EntityPool::spawn`]. No partial effect occurs on failure.
    pub fn spawn<T: PoolEntity>(&mut self) -> PoolResult<PoolHandle> {
        self.pool_mut::<T>()?.spawn()
    }

    /// Despawns an entity through the pool registered for `T`.
    ///
    /// # Arguments
    ///
    /// * `handle` - Handle minted by a prior spawn of `T`
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotRegistered`] if no pool is registered, or any
    /// error of [`EntityPool::despawn`].
    pub fn despawn<T: PoolEntity>(&mut self, handle: PoolHandle) -> PoolResult<()> {
        self.pool_mut::<T>()?.despawn(handle)
    }

    /// Despawns every active entity in the pool registered for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotRegistered`] if no pool is registered.
    pub fn despawn_all<T: PoolEntity>(&mut self) -> PoolResult<usize> {
        Ok(self.pool_mut::<T>()?.despawn_all())
    }

    /// Despawns every active entity in every registered pool.
    ///
    /// # Returns
    ///
    /// The total number of entities despawned across all pools.
    pub fn despawn_all_pools(&mut self) -> usize {
        let mut total = 0;
        for erased in self.pools.values_mut() {
            let despawned = erased.despawn_all_entities();
            if despawned > 0 {
                tracing::debug!(
                    entity = erased.entity_type_name(),
                    despawned,
                    "pool swept"
                );
            }
            total += despawned;
        }
        total
    }

    /// Returns the number of registered pools.
    #[inline]
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Checks whether the registry has no pools.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Builds the missing-registration error for entity type `T`.
fn not_registered<T: PoolEntity>() -> PoolError {
    PoolError::NotRegistered {
        type_name: std::any::type_name::<T>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Projectile {
        damage: u32,
    }

    impl PoolEntity for Projectile {}

    #[derive(Clone, Default)]
    struct Decal {
        fade: f32,
    }

    impl PoolEntity for Decal {}

    #[test]
    fn test_add_and_has_pool() {
        let mut registry = PoolRegistry::new();
        assert!(registry.is_empty());

        registry
            .add_pool(EntityPool::of_clones(4, Projectile::default()))
            .unwrap();

        assert!(registry.has_pool::<Projectile>());
        assert!(registry.has_pool_by_id(TypeId::of::<Projectile>()));
        assert!(!registry.has_pool::<Decal>());
        assert_eq!(registry.pool_count(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = PoolRegistry::new();
        registry
            .add_pool(EntityPool::of_clones(2, Projectile::default()))
            .unwrap();

        let err = registry
            .add_pool(EntityPool::of_clones(7, Projectile::default()))
            .unwrap_err();
        assert!(matches!(err, PoolError::AlreadyRegistered { .. }));

        // First registration still drives spawns: its pre-warm count is intact
        assert_eq!(registry.pool::<Projectile>().unwrap().free_count(), 2);
    }

    #[test]
    fn test_unregistered_type_rejected() {
        let mut registry = PoolRegistry::new();

        assert!(matches!(
            registry.spawn::<Projectile>(),
            Err(PoolError::NotRegistered { .. })
        ));
        assert!(matches!(
            registry.despawn::<Projectile>(PoolHandle::new(0, 1)),
            Err(PoolError::NotRegistered { .. })
        ));
        assert!(matches!(
            registry.despawn_all::<Projectile>(),
            Err(PoolError::NotRegistered { .. })
        ));
        assert!(matches!(
            registry.pool::<Projectile>(),
            Err(PoolError::NotRegistered { .. })
        ));
    }

    #[test]
    fn test_dispatch_does_not_cross_contaminate() {
        let mut registry = PoolRegistry::new();
        registry
            .add_pool(EntityPool::of_clones(1, Projectile::default()))
            .unwrap();
        registry
            .add_pool(EntityPool::of_clones(1, Decal::default()))
            .unwrap();

        let shot = registry.spawn::<Projectile>().unwrap();
        let mark = registry.spawn::<Decal>().unwrap();
        registry.pool_mut::<Projectile>().unwrap().get_mut(shot).unwrap().damage = 25;
        registry.pool_mut::<Decal>().unwrap().get_mut(mark).unwrap().fade = 0.5;

        registry.despawn::<Projectile>(shot).unwrap();

        let projectiles = registry.pool::<Projectile>().unwrap();
        let decals = registry.pool::<Decal>().unwrap();
        assert_eq!(projectiles.active_count(), 0);
        assert_eq!(projectiles.free_count(), 1);
        assert_eq!(decals.active_count(), 1);
        assert_eq!(decals.free_count(), 0);
        assert!((decals.get(mark).unwrap().fade - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_remove_pool_leaves_entities_untouched() {
        let mut registry = PoolRegistry::new();
        registry
            .add_pool(EntityPool::of_clones(1, Projectile::default()))
            .unwrap();

        let shot = registry.spawn::<Projectile>().unwrap();
        let pool = registry.remove_pool::<Projectile>().unwrap();

        // Removal is a pure registry operation
        assert!(pool.is_active(shot));
        assert_eq!(pool.active_count(), 1);
        assert!(!registry.has_pool::<Projectile>());

        // Removing again is a no-op
        assert!(registry.remove_pool::<Projectile>().is_none());
    }

    #[test]
    fn test_despawn_all_pools_sweeps_everything() {
        let mut registry = PoolRegistry::new();
        registry
            .add_pool(EntityPool::of_clones(0, Projectile::default()))
            .unwrap();
        registry
            .add_pool(EntityPool::of_clones(0, Decal::default()))
            .unwrap();

        let _shots: Vec<_> = (0..3)
            .map(|_| registry.spawn::<Projectile>().unwrap())
            .collect();
        let _mark = registry.spawn::<Decal>().unwrap();

        assert_eq!(registry.despawn_all_pools(), 4);
        assert_eq!(registry.pool::<Projectile>().unwrap().active_count(), 0);
        assert_eq!(registry.pool::<Decal>().unwrap().active_count(), 0);

        // Sweep on an idle registry is a no-op
        assert_eq!(registry.despawn_all_pools(), 0);
    }
}
