//! Connected / disconnected state of player identities.

use crate::error::Result;
use pluton_engine::{DataStore, categories};
use pluton_entity::{OfflinePlayer, Player};
use pluton_types::PlayerId;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Offline records of every player that disconnected and has not come back.
///
/// An identity has an entry exactly while it is disconnected, provided it
/// disconnected at least once since the registry was created.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    offline: HashMap<PlayerId, OfflinePlayer>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the pending record of a reconnecting player and returns it.
    pub fn on_connect(&mut self, id: PlayerId) -> Option<OfflinePlayer> {
        let record = self.offline.remove(&id);
        if record.is_some() {
            debug!(player_id = %id, "Player is back online");
        }
        record
    }

    /// Records the live state of a disconnecting player.
    ///
    /// A snapshot persisted under `OfflinePlayers` is updated so time online
    /// keeps accumulating; otherwise a fresh record is captured. A repeated
    /// disconnect only refreshes the pending record, since its session is
    /// already counted.
    pub fn on_disconnect(&mut self, player: &Player<'_>, store: &dyn DataStore) -> &OfflinePlayer {
        let id = player.id();
        let record = match self.offline.remove(&id) {
            Some(mut record) => {
                record.refresh(player);
                record
            }
            None => match load_snapshot(store, &player.steam_id()) {
                Some(mut record) => {
                    record.update(player);
                    record
                }
                None => OfflinePlayer::from_player(player),
            },
        };
        debug!(player_id = %id, total_time_online = record.total_time_online, "Player went offline");
        self.offline.entry(id).insert_entry(record).into_mut()
    }

    /// Writes one record to the store under `OfflinePlayers`.
    pub fn save_record(record: &OfflinePlayer, store: &mut dyn DataStore) -> Result<()> {
        store.set(
            categories::OFFLINE_PLAYERS,
            &record.id.to_string(),
            record.to_value()?,
        )?;
        Ok(())
    }

    pub fn get(&self, id: PlayerId) -> Option<&OfflinePlayer> {
        self.offline.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.offline.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.offline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offline.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OfflinePlayer> + '_ {
        self.offline.values()
    }

    /// Writes every record to the store under `OfflinePlayers`. Returns the
    /// number of records written.
    pub fn persist(&self, store: &mut dyn DataStore) -> Result<usize> {
        for record in self.offline.values() {
            Self::save_record(record, store)?;
        }
        debug!(count = self.offline.len(), "Persisted offline players");
        Ok(self.offline.len())
    }
}

fn load_snapshot(store: &dyn DataStore, key: &str) -> Option<OfflinePlayer> {
    let value = match store.get(categories::OFFLINE_PLAYERS, key) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            warn!(player_id = key, "Couldn't read offline snapshot: {}", e);
            return None;
        }
    };
    match OfflinePlayer::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(player_id = key, "Discarding malformed offline snapshot: {}", e);
            None
        }
    }
}
