//! Stable views over live engine entities.
//!
//! A wrapper ([`Player`], [`Npc`], [`Resource`]) holds exactly one borrowed
//! reference to an engine object and nothing else. Every getter reads the
//! live object and every setter writes straight through, so a wrapper is a
//! view, not a snapshot. It must not outlive the hook or lookup that
//! produced it: once the engine destroys the entity the view is invalid.
//!
//! Wrappers compare by the entity's identity ([`PlayerId`] or [`NetId`]),
//! never by wrapper instance.
//!
//! [`PlayerId`]: pluton_types::PlayerId
//! [`NetId`]: pluton_types::NetId

mod npc;
mod offline;
mod player;
mod resource;
mod stats;
pub mod teleport;

pub use npc::Npc;
pub use offline::OfflinePlayer;
pub use player::{DEFAULT_MESSAGE_NAME, Player};
pub use resource::Resource;
pub use stats::PlayerStats;
