//! Interfaces the hook bridge consumes from its host.
//!
//! The game engine, the durable key-value store and the permission list are
//! external collaborators. This crate pins down exactly what the bridge needs
//! from each of them:
//! - [`NativePlayer`], [`NativeAnimal`], [`NativeResource`], [`NativeEntity`],
//!   [`NativeItem`]: engine-owned mutable objects
//! - [`PlayerDirectory`], [`Terrain`], [`Console`], [`ConsoleArg`]: engine services
//! - [`DataStore`]: durable (category, key) → JSON value store
//! - [`PermissionList`]: group membership and bans
//!
//! [`MemoryStore`] and [`UserList`] are reference implementations of the two
//! storage contracts.

mod error;
mod native;
mod store;
mod users;

pub use error::{StoreError, StoreResult};
pub use native::{
    Console, ConsoleArg, NativeAnimal, NativeEntity, NativeItem, NativePlayer, NativeResource,
    PlayerDirectory, Terrain,
};
pub use store::{DataStore, MemoryStore, categories};
pub use users::{PermissionList, UserEntry, UserList};
