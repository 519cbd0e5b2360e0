//! # Entity Pool
//!
//! Recycles previously constructed entities of one type instead of discarding
//! them. Every instance the pool ever builds stays owned by the pool; callers
//! hold generational [`PoolHandle`]s while an entity is active.
//!
//! ## Free/Active Partition
//!
//! At every observation point each slot is in exactly one of two states:
//! - **free**: available for reuse, index on the free stack
//! - **active**: held by a caller, index in the activation-order list
//!
//! Spawn pops the most-recently-freed slot (LIFO), so a despawn immediately
//! followed by a spawn hands back the same instance.

use crate::config::PoolSettings;
use crate::entity::{PoolEntity, WorldPresence};
use crate::error::{PoolError, PoolResult};
use crate::handle::PoolHandle;

/// Build capability: derives a brand-new instance from the pool's sample.
type BuildFn<T> = Box<dyn Fn(&T) -> T>;

/// One slot of pool-owned entity storage.
struct Slot<T> {
    /// The entity. Owned by the pool for its entire lifetime.
    entity: T,
    /// Bumped on every spawn so stale handles are detectable.
    generation: u32,
    /// Whether the slot is currently held by a caller.
    active: bool,
}

/// A recycling pool for entities of one type.
///
/// The pool amortizes construction cost: spawn reuses a free instance when
/// one exists and builds a new one (from the configured build function and
/// sample) only when the free stack is empty. Slot storage only grows.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = EntityPool::with_factory(64, Projectile::default);
///
/// let shot = pool.spawn()?;
/// pool.get_mut(shot).unwrap().heading = [0.0, 1.0, 0.0];
/// pool.despawn(shot)?;
/// ```
pub struct EntityPool<T: PoolEntity> {
    /// Every instance the pool has ever produced. Grows, never shrinks.
    slots: Vec<Slot<T>>,
    /// Free slot indices, most-recently-freed on top.
    free: Vec<u32>,
    /// Active slot indices in activation order (drives `despawn_all`).
    active: Vec<u32>,
    /// Prototype the build function derives new instances from.
    sample: T,
    /// Build capability invoked when the free stack is empty.
    build: BuildFn<T>,
    /// Optional hard cap on the total slot count.
    max_size: Option<usize>,
}

impl<T: PoolEntity> EntityPool<T> {
    /// Creates a pool that derives new instances from a sample.
    ///
    /// Pre-populates the free stack with `initial_size` instances, each built
    /// by invoking `build` against `sample`. The active list is untouched.
    ///
    /// # Arguments
    ///
    /// * `initial_size` - Number of instances to construct up front
    /// * `sample` - Prototype passed to `build` for every new instance
    /// * `build` - Derives a brand-new instance from the sample
    pub fn new<F>(initial_size: usize, sample: T, build: F) -> Self
    where
        F: Fn(&T) -> T + 'static,
    {
        Self::with_settings(
            PoolSettings {
                initial_size,
                max_size: None,
            },
            sample,
            build,
        )
    }

    /// Creates a sample-deriving pool from explicit [`PoolSettings`].
    ///
    /// The cap is a hard bound on the slot count, so a pre-warm count above
    /// it is clamped down to the cap.
    ///
    /// # Arguments
    ///
    /// * `settings` - Pre-warm count and optional slot cap
    /// * `sample` - Prototype passed to `build` for every new instance
    /// * `build` - Derives a brand-new instance from the sample
    pub fn with_settings<F>(settings: PoolSettings, sample: T, build: F) -> Self
    where
        F: Fn(&T) -> T + 'static,
    {
        let pre_warm = match settings.max_size {
            Some(max) => settings.initial_size.min(max),
            None => settings.initial_size,
        };

        let mut pool = Self {
            slots: Vec::with_capacity(pre_warm),
            free: Vec::with_capacity(pre_warm),
            active: Vec::new(),
            sample,
            build: Box::new(build),
            max_size: settings.max_size,
        };

        for _ in 0..pre_warm {
            let index = pool.grow_one();
            pool.free.push(index);
        }

        pool
    }

    /// Creates a pool whose instances come from a zero-argument factory.
    ///
    /// The sample is one factory-produced instance kept as a placeholder; it
    /// is never handed out and the build function ignores it.
    ///
    /// # Arguments
    ///
    /// * `initial_size` - Number of instances to construct up front
    /// * `factory` - Produces a brand-new instance on demand
    pub fn with_factory<F>(initial_size: usize, factory: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        let sample = factory();
        Self::new(initial_size, sample, move |_| factory())
    }

    /// Creates a factory-backed pool from explicit [`PoolSettings`].
    ///
    /// # Arguments
    ///
    /// * `settings` - Pre-warm count and optional slot cap
    /// * `factory` - Produces a brand-new instance on demand
    pub fn with_factory_settings<F>(settings: PoolSettings, factory: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        let sample = factory();
        Self::with_settings(settings, sample, move |_| factory())
    }

    /// Creates a pool whose instances are structural copies of a prototype.
    ///
    /// # Arguments
    ///
    /// * `initial_size` - Number of instances to construct up front
    /// * `sample` - Prototype cloned for every new instance
    pub fn of_clones(initial_size: usize, sample: T) -> Self
    where
        T: Clone,
    {
        Self::new(initial_size, sample, T::clone)
    }

    /// Creates a prototype-cloning pool from explicit [`PoolSettings`].
    ///
    /// # Arguments
    ///
    /// * `settings` - Pre-warm count and optional slot cap
    /// * `sample` - Prototype cloned for every new instance
    pub fn of_clones_with_settings(settings: PoolSettings, sample: T) -> Self
    where
        T: Clone,
    {
        Self::with_settings(settings, sample, T::clone)
    }

    /// Creates a prototype-cloning pool for host-world entities.
    ///
    /// Each clone has its world presence cleared immediately after
    /// duplication, before it enters the free stack. Instances sitting in the
    /// pool are never visibly live until spawned.
    ///
    /// # Arguments
    ///
    /// * `initial_size` - Number of instances to construct up front
    /// * `sample` - Prototype cloned for every new instance
    pub fn of_dormant_clones(initial_size: usize, sample: T) -> Self
    where
        T: Clone + WorldPresence,
    {
        Self::new(initial_size, sample, dormant_clone)
    }

    /// Creates a dormant-cloning pool from explicit [`PoolSettings`].
    ///
    /// # Arguments
    ///
    /// * `settings` - Pre-warm count and optional slot cap
    /// * `sample` - Prototype cloned for every new instance
    pub fn of_dormant_clones_with_settings(settings: PoolSettings, sample: T) -> Self
    where
        T: Clone + WorldPresence,
    {
        Self::with_settings(settings, sample, dormant_clone)
    }

    /// Spawns an entity: reuses the most-recently-freed instance, or builds a
    /// brand-new one when the free stack is empty.
    ///
    /// The entity's `on_spawn` hook runs after the pool has recorded it as
    /// active, so the hook observes a consistent pool state. The pool does
    /// not reset application-level entity state.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if the free stack is empty and the
    /// slot count has reached the configured cap.
    pub fn spawn(&mut self) -> PoolResult<PoolHandle> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if let Some(max) = self.max_size {
                    if self.slots.len() >= max {
                        return Err(PoolError::Exhausted {
                            type_name: std::any::type_name::<T>(),
                            max_size: max,
                        });
                    }
                }
                tracing::trace!(
                    entity = std::any::type_name::<T>(),
                    total = self.slots.len() + 1,
                    "pool growing past its pre-warm set"
                );
                self.grow_one()
            }
        };

        let idx = index as usize;
        let slot = &mut self.slots[idx];
        // New generation invalidates every handle from previous activations.
        slot.generation = slot.generation.wrapping_add(1);
        slot.active = true;
        let handle = PoolHandle::new(index, slot.generation);

        self.active.push(index);
        self.slots[idx].entity.on_spawn();

        Ok(handle)
    }

    /// Despawns an entity, returning its slot to the free stack.
    ///
    /// The entity's `on_despawn` hook runs after the move. The pool does not
    /// reset application-level entity state.
    ///
    /// # Arguments
    ///
    /// * `handle` - Handle minted by a prior [`spawn`](EntityPool::spawn)
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotOwned`] if the handle does not refer to a
    /// currently active slot of this pool (never spawned, already despawned,
    /// or foreign). No state changes on rejection.
    pub fn despawn(&mut self, handle: PoolHandle) -> PoolResult<()> {
        if !self.is_active(handle) {
            return Err(PoolError::NotOwned {
                type_name: std::any::type_name::<T>(),
                index: handle.index(),
                generation: handle.generation(),
            });
        }

        let index = handle.index();
        self.slots[index as usize].active = false;
        self.active.retain(|&i| i != index);
        self.free.push(index);
        self.slots[index as usize].entity.on_despawn();

        Ok(())
    }

    /// Despawns every active entity, in activation order.
    ///
    /// Each entity goes through the same per-entity logic as
    /// [`despawn`](EntityPool::despawn), including its individual
    /// `on_despawn` hook. Calling on an empty active list is a no-op.
    ///
    /// # Returns
    ///
    /// The number of entities despawned.
    pub fn despawn_all(&mut self) -> usize {
        let order = std::mem::take(&mut self.active);
        for &index in &order {
            let idx = index as usize;
            self.slots[idx].active = false;
            self.free.push(index);
            self.slots[idx].entity.on_despawn();
        }
        order.len()
    }

    /// Checks whether a handle refers to a currently active entity.
    ///
    /// # Arguments
    ///
    /// * `handle` - The handle to check
    #[inline]
    #[must_use]
    pub fn is_active(&self, handle: PoolHandle) -> bool {
        let idx = handle.index() as usize;
        if idx >= self.slots.len() {
            return false;
        }

        let slot = &self.slots[idx];
        slot.active && slot.generation == handle.generation()
    }

    /// Gets an active entity by handle.
    ///
    /// # Arguments
    ///
    /// * `handle` - The handle to look up
    ///
    /// # Returns
    ///
    /// Reference to the entity, or `None` if the handle is stale or free.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        if !self.is_active(handle) {
            return None;
        }
        Some(&self.slots[handle.index() as usize].entity)
    }

    /// Gets a mutable active entity by handle.
    ///
    /// # Arguments
    ///
    /// * `handle` - The handle to look up
    ///
    /// # Returns
    ///
    /// Mutable reference to the entity, or `None` if the handle is stale or
    /// free.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        if !self.is_active(handle) {
            return None;
        }
        Some(&mut self.slots[handle.index() as usize].entity)
    }

    /// Returns the number of currently active entities.
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of entities available for reuse.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Returns the total number of instances this pool has ever produced.
    #[inline]
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over active entities in activation order.
    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.active.iter().map(|&i| &self.slots[i as usize].entity)
    }

    /// Builds one instance from the sample and appends its slot, inactive and
    /// not yet on the free stack.
    fn grow_one(&mut self) -> u32 {
        assert!(
            self.slots.len() < u32::MAX as usize,
            "Pool slot count cannot exceed u32::MAX"
        );

        let index = self.slots.len() as u32;
        let entity = (self.build)(&self.sample);
        self.slots.push(Slot {
            entity,
            generation: 0,
            active: false,
        });

        index
    }
}

/// Clones the sample and clears the clone's world presence before it enters
/// the pool.
fn dormant_clone<T: Clone + WorldPresence>(sample: &T) -> T {
    let mut entity = sample.clone();
    entity.set_present(false);
    entity
}
