//! Permission and ban list contract.

use crate::error::StoreResult;
use pluton_types::{PlayerId, UserGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Group classification of player identities, persisted by the host.
pub trait PermissionList {
    /// Records `id` as a member of `group`, replacing any previous group.
    fn set(&mut self, id: PlayerId, group: UserGroup, display_name: &str, reason: &str);

    /// Flushes pending changes to the backing storage.
    fn save(&mut self) -> StoreResult<()>;

    fn is(&self, id: PlayerId, group: UserGroup) -> bool;
}

/// One row of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub group: UserGroup,
    pub display_name: String,
    pub reason: String,
}

/// [`PermissionList`] kept in memory and saved as JSON to an optional path.
#[derive(Debug, Default)]
pub struct UserList {
    entries: BTreeMap<PlayerId, UserEntry>,
    path: Option<PathBuf>,
    saves: usize,
}

impl UserList {
    /// Creates an empty list that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the list from `path`; a missing file yields an empty list that
    /// will be created on the first save.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let entries: BTreeMap<PlayerId, UserEntry> = serde_json::from_str(&contents)?;
            info!("Loaded {} user entries from {:?}", entries.len(), path);
            entries
        } else {
            debug!("No user list at {:?}, starting empty", path);
            BTreeMap::new()
        };
        Ok(Self {
            entries,
            path: Some(path),
            saves: 0,
        })
    }

    pub fn get(&self, id: PlayerId) -> Option<&UserEntry> {
        self.entries.get(&id)
    }

    pub fn group_of(&self, id: PlayerId) -> UserGroup {
        self.entries.get(&id).map(|e| e.group).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PermissionList for UserList {
    fn set(&mut self, id: PlayerId, group: UserGroup, display_name: &str, reason: &str) {
        debug!(player_id = %id, %group, "Setting user group");
        self.entries.insert(
            id,
            UserEntry {
                group,
                display_name: display_name.to_string(),
                reason: reason.to_string(),
            },
        );
    }

    fn save(&mut self) -> StoreResult<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&self.entries)?;
            std::fs::write(path, json)?;
            debug!("Saved {} user entries to {:?}", self.entries.len(), path);
        }
        self.saves += 1;
        Ok(())
    }

    fn is(&self, id: PlayerId, group: UserGroup) -> bool {
        self.entries.get(&id).is_some_and(|e| e.group == group)
    }
}
