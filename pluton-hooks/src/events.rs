//! Typed events handed to subscribers.
//!
//! Every event is built right before publication and borrows the wrappers
//! and hit context of the callback that produced it. Subscribers get it by
//! `&mut`; the only field the dispatcher reads back is
//! [`PlayerDeathEvent::drop_loot`].

use pluton_entity::{Npc, OfflinePlayer, Player, Resource};
use pluton_types::HitInfo;

/// A gatherable resource is about to take a hit.
#[derive(Debug)]
pub struct GatherEvent<'a> {
    pub resource: Resource<'a>,
    pub info: &'a HitInfo,
}

impl GatherEvent<'_> {
    /// Health the resource will lose once subscribers are done.
    pub fn damage(&self) -> f32 {
        self.info.gather_damage()
    }
}

/// An NPC is about to take a non-lethal hit.
#[derive(Debug)]
pub struct NpcHurtEvent<'a> {
    pub npc: Npc<'a>,
    pub info: &'a HitInfo,
}

/// An NPC died.
#[derive(Debug)]
pub struct NpcDeathEvent<'a> {
    pub npc: Npc<'a>,
    pub info: &'a HitInfo,
}

/// A living player is about to take damage.
#[derive(Debug)]
pub struct PlayerHurtEvent<'a> {
    pub victim: Player<'a>,
    pub info: &'a HitInfo,
}

/// A player died.
#[derive(Debug)]
pub struct PlayerDeathEvent<'a> {
    pub victim: Player<'a>,
    pub info: &'a HitInfo,
    drop_loot: bool,
}

impl<'a> PlayerDeathEvent<'a> {
    pub fn new(victim: Player<'a>, info: &'a HitInfo) -> Self {
        Self {
            victim,
            info,
            drop_loot: true,
        }
    }

    /// Whether the corpse keeps the inventory. Defaults to `true`.
    pub fn drop_loot(&self) -> bool {
        self.drop_loot
    }

    /// Setting `false` strips the inventory after every subscriber ran.
    pub fn set_drop_loot(&mut self, drop_loot: bool) {
        self.drop_loot = drop_loot;
    }
}

#[derive(Debug)]
pub struct PlayerConnectedEvent<'a> {
    pub player: Player<'a>,
    /// Offline record the player left behind on the previous disconnect.
    pub previous: Option<OfflinePlayer>,
}

#[derive(Debug)]
pub struct PlayerDisconnectedEvent<'a> {
    pub player: Player<'a>,
    /// Record the presence registry now holds for this player.
    pub record: &'a OfflinePlayer,
}

/// A chat line went through `chat.say`.
#[derive(Debug)]
pub struct ChatEvent<'a> {
    pub player: Player<'a>,
    /// Text after truncation, or the raw argument when chat is disabled.
    pub message: String,
    /// Whether the line was broadcast to every client.
    pub broadcast: bool,
}

/// A chat line starting with `/`.
#[derive(Debug)]
pub struct CommandEvent<'a> {
    pub player: Player<'a>,
    pub command: String,
    pub args: Vec<String>,
}
