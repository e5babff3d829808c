//! Core type definitions for Pluton.
//!
//! This crate defines the plain data shared by every layer of the hook
//! bridge:
//! - Player and network identifiers
//! - World positions
//! - Damage context handed over by the engine (`HitInfo`)
//! - Permission groups and the execution realm
//!
//! Nothing here touches a live engine object; the wrappers that do live in
//! `pluton-entity`.

mod damage;
mod geometry;
mod ids;
mod realm;
mod text;
mod users;

pub use damage::{DamageType, HitInfo, Initiator};
pub use geometry::Vec3;
pub use ids::{NetId, PlayerId};
pub use realm::Realm;
pub use text::quote_safe;
pub use users::UserGroup;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid player id: {0}")]
    InvalidPlayerId(#[from] std::num::ParseIntError),

    #[error("unknown user group: {0}")]
    UnknownUserGroup(String),
}
