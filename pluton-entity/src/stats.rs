use serde::{Deserialize, Serialize};

/// Per-player counters kept in the durable store under the `PlayerStats`
/// category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub kills: u32,
    pub deaths: u32,
    pub npc_kills: u32,
    pub damage_taken: f32,
    pub damage_dealt: f32,
}
