//! # Pool Error Types
//!
//! All errors that can occur in the recycling core.

use thiserror::Error;

/// Errors that can occur in the recycling core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool for this entity type is already registered.
    ///
    /// Silent replacement is disallowed: it would orphan every entity still
    /// active in the previous pool.
    #[error("pool already registered for entity type {type_name}")]
    AlreadyRegistered {
        /// Name of the entity type.
        type_name: &'static str,
    },

    /// No pool is registered for this entity type.
    #[error("no pool registered for entity type {type_name}")]
    NotRegistered {
        /// Name of the entity type.
        type_name: &'static str,
    },

    /// The handle does not refer to a currently active entity of this pool.
    ///
    /// Covers handles that were never spawned here, were already despawned,
    /// or belong to a different pool.
    #[error("handle {index}v{generation} is not owned by the {type_name} pool")]
    NotOwned {
        /// Name of the entity type.
        type_name: &'static str,
        /// Index carried by the rejected handle.
        index: u32,
        /// Generation carried by the rejected handle.
        generation: u32,
    },

    /// The pool is saturated: the free stack is empty and the slot count has
    /// reached the configured cap.
    #[error("{type_name} pool exhausted: all {max_size} slots are active")]
    Exhausted {
        /// Name of the entity type.
        type_name: &'static str,
        /// Configured maximum slot count.
        max_size: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
