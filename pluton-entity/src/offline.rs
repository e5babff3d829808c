//! Durable snapshot of a player who is not connected.

use crate::Player;
use pluton_types::{PlayerId, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Last known state of a disconnected player.
///
/// Built from a live [`Player`] view when the player disconnects and kept
/// until the same identity connects again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflinePlayer {
    pub id: PlayerId,
    pub name: String,
    pub ip: String,
    pub os: String,
    pub location: Vec3,
    pub admin: bool,
    /// Seconds online summed over every session this record has seen.
    pub total_time_online: f32,
    /// Unix timestamp (seconds) of the most recent disconnect.
    pub last_seen: i64,
}

impl OfflinePlayer {
    /// Captures a fresh record from live state.
    pub fn from_player(player: &Player<'_>) -> Self {
        Self {
            id: player.id(),
            name: player.name(),
            ip: player.ip(),
            os: player.os(),
            location: player.location(),
            admin: player.is_admin(),
            total_time_online: player.time_online(),
            last_seen: chrono::Utc::now().timestamp(),
        }
    }

    /// Refreshes this record from live state, adding the current session to
    /// the time online.
    pub fn update(&mut self, player: &Player<'_>) {
        self.refresh(player);
        self.total_time_online += player.time_online();
    }

    /// Refreshes identity, location and `last_seen` without touching the
    /// time online. Used when the current session is already counted.
    pub fn refresh(&mut self, player: &Player<'_>) {
        self.name = player.name();
        self.ip = player.ip();
        self.os = player.os();
        self.location = player.location();
        self.admin = player.is_admin();
        self.last_seen = chrono::Utc::now().timestamp();
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
