//! # REVENANT Entity Recycling
//!
//! Recycling pools for entities that are spawned and despawned at high
//! frequency (projectiles, impact markers, pickups). Instead of constructing
//! and discarding instances, each pool cycles them through a free/active
//! lifecycle:
//!
//! - Spawn reuses the most-recently-freed instance, building a new one only
//!   when the free stack is empty
//! - Despawn returns the instance to the free stack for the next spawn
//! - A [`PoolRegistry`] holds exactly one pool per entity type and dispatches
//!   by type
//!
//! ## Architecture Rules
//!
//! 1. **Entities are recycled, never discarded** - a pool's slot storage only
//!    grows, and every instance it ever built stays owned by it
//! 2. **Stale handles fail loudly** - generational handles make despawning a
//!    foreign or already-freed entity an error, not silent corruption
//! 3. **Single-threaded by contract** - every mutating operation takes
//!    `&mut self`; there is no internal locking
//!
//! ## Example
//!
//! ```rust,ignore
//! use revenant_pool::{EntityPool, PoolEntity, PoolRegistry};
//!
//! #[derive(Default)]
//! struct Projectile { heading: [f32; 3] }
//! impl PoolEntity for Projectile {}
//!
//! let mut registry = PoolRegistry::new();
//! registry.add_pool(EntityPool::with_factory(64, Projectile::default))?;
//!
//! let shot = registry.spawn::<Projectile>()?;
//! registry.pool_mut::<Projectile>()?.get_mut(shot).unwrap().heading = [0.0, 1.0, 0.0];
//! registry.despawn::<Projectile>(shot)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod entity;
pub mod error;
pub mod handle;
pub mod pool;
pub mod registry;

pub use config::{PoolSettings, PoolsConfig};
pub use entity::{PoolEntity, WorldPresence};
pub use error::{PoolError, PoolResult};
pub use handle::PoolHandle;
pub use pool::EntityPool;
pub use registry::PoolRegistry;
