//! Hook layer of the Pluton bridge.
//!
//! The engine calls one [`HookDispatcher`] method per lifecycle point. The
//! dispatcher wraps the native actors, publishes a typed event on its
//! [`EventBus`] and applies the mutations it is authoritative for:
//! - resource depletion on gathering
//! - animal health and death on hits
//! - bleeding, health loss and death checks on player hits
//! - inventory stripping when a death subscriber cleared `drop_loot`
//!
//! [`PresenceRegistry`] keeps the offline record of every disconnected
//! player. Configuration comes from a TOML file ([`HookConfig`]).

pub mod bus;
mod config;
mod dispatcher;
mod error;
pub mod events;
mod presence;

pub use bus::{DispatchReport, EventBus, HandlerResult, SubscriptionId};
pub use config::{ChatConfig, DEFAULT_CHAT_MAX_LENGTH, HookConfig, ServerSection};
pub use dispatcher::{HIT_EFFECT, HookDispatcher, HookOutcome, SkipReason};
pub use error::{HookError, Result};
pub use events::{
    ChatEvent, CommandEvent, GatherEvent, NpcDeathEvent, NpcHurtEvent, PlayerConnectedEvent,
    PlayerDeathEvent, PlayerDisconnectedEvent, PlayerHurtEvent,
};
pub use presence::PresenceRegistry;
