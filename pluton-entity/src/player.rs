//! Player view.

use crate::stats::PlayerStats;
use crate::teleport;
use pluton_engine::{
    DataStore, NativePlayer, PermissionList, PlayerDirectory, StoreResult, Terrain, categories,
};
use pluton_types::{DamageType, HitInfo, Initiator, PlayerId, UserGroup, Vec3, quote_safe};
use std::fmt;
use tracing::{debug, warn};

/// Sender name used by [`Player::message`].
pub const DEFAULT_MESSAGE_NAME: &str = "Pluton";

/// Non-caching view over a live [`NativePlayer`].
#[derive(Clone, Copy)]
pub struct Player<'a> {
    native: &'a dyn NativePlayer,
}

impl<'a> Player<'a> {
    /// Wraps a native player. Never fails.
    pub fn new(native: &'a dyn NativePlayer) -> Self {
        Self { native }
    }

    /// Wraps a native player and makes sure it has a stats record.
    ///
    /// Stats are auxiliary: a store failure or a malformed record is logged
    /// and the returned view works exactly like [`Player::new`].
    pub fn with_stats(native: &'a dyn NativePlayer, store: &mut dyn DataStore) -> Self {
        let player = Self::new(native);
        if let Err(e) = player.ensure_stats(store) {
            warn!(player_id = %player.id(), "Couldn't load stats: {}", e);
        }
        player
    }

    fn ensure_stats(&self, store: &mut dyn DataStore) -> StoreResult<()> {
        let key = self.steam_id();
        match store.get(categories::PLAYER_STATS, &key)? {
            Some(value) => {
                serde_json::from_value::<PlayerStats>(value)?;
            }
            None => {
                store.set(
                    categories::PLAYER_STATS,
                    &key,
                    serde_json::to_value(PlayerStats::default())?,
                )?;
                debug!(player_id = %self.id(), "Created stats record");
            }
        }
        Ok(())
    }

    /// Returns the wrapped engine object.
    pub fn native(&self) -> &'a dyn NativePlayer {
        self.native
    }

    // ================================================================
    // Lookup
    // ================================================================

    /// Finds an online player by display name, decimal id or address.
    pub fn find(directory: &'a dyn PlayerDirectory, query: &str) -> Option<Self> {
        let found = directory.find(query).map(Self::new);
        if found.is_none() {
            debug!(query, "Couldn't find player");
        }
        found
    }

    pub fn find_by_game_id(directory: &'a dyn PlayerDirectory, id: PlayerId) -> Option<Self> {
        let found = directory.find_by_id(id).map(Self::new);
        if found.is_none() {
            debug!(player_id = %id, "Couldn't find player");
        }
        found
    }

    /// Like [`Player::find_by_game_id`] with the id in string form; an
    /// unparsable id is a miss.
    pub fn find_by_steam_id(directory: &'a dyn PlayerDirectory, steam_id: &str) -> Option<Self> {
        match PlayerId::parse(steam_id) {
            Ok(id) => Self::find_by_game_id(directory, id),
            Err(e) => {
                debug!(steam_id, "Couldn't parse player id: {}", e);
                None
            }
        }
    }

    // ================================================================
    // Identity and connection
    // ================================================================

    pub fn id(&self) -> PlayerId {
        self.native.user_id()
    }

    /// The player id in the decimal form used as durable store key.
    pub fn steam_id(&self) -> String {
        self.id().to_string()
    }

    pub fn name(&self) -> String {
        self.native.display_name()
    }

    pub fn is_admin(&self) -> bool {
        self.native.is_admin()
    }

    pub fn auth_status(&self) -> String {
        self.native.auth_status()
    }

    pub fn ip(&self) -> String {
        self.native.ip_address()
    }

    pub fn os(&self) -> String {
        self.native.os()
    }

    pub fn ping(&self) -> u32 {
        self.native.ping()
    }

    pub fn time_online(&self) -> f32 {
        self.native.connection_time()
    }

    pub fn is_moderator(&self, users: &dyn PermissionList) -> bool {
        users.is(self.id(), UserGroup::Moderator)
    }

    pub fn is_owner(&self, users: &dyn PermissionList) -> bool {
        users.is(self.id(), UserGroup::Owner)
    }

    // ================================================================
    // State
    // ================================================================

    pub fn health(&self) -> f32 {
        self.native.health()
    }

    pub fn set_health(&self, health: f32) {
        self.native.set_health(health);
    }

    pub fn is_dead(&self) -> bool {
        self.native.is_dead()
    }

    pub fn location(&self) -> Vec3 {
        self.native.position()
    }

    /// Moves the player without any network refresh. Use [`Player::teleport`]
    /// for moves the client must see.
    pub fn set_location(&self, location: Vec3) {
        self.native.set_position(location);
    }

    pub fn x(&self) -> f32 {
        self.location().x
    }

    pub fn y(&self) -> f32 {
        self.location().y
    }

    pub fn z(&self) -> f32 {
        self.location().z
    }

    pub fn set_x(&self, x: f32) {
        self.set_location(Vec3 { x, ..self.location() });
    }

    pub fn set_y(&self, y: f32) {
        self.set_location(Vec3 { y, ..self.location() });
    }

    pub fn set_z(&self, z: f32) {
        self.set_location(Vec3 { z, ..self.location() });
    }

    pub fn inventory_len(&self) -> usize {
        self.native.inventory_len()
    }

    /// Point the player is looking at, or [`Vec3::ZERO`] when the ray hits
    /// nothing within `max_distance`.
    pub fn look_point(&self, max_distance: f32) -> Vec3 {
        self.native.look_point(max_distance).unwrap_or(Vec3::ZERO)
    }

    /// Reads the stats record from the store. Nothing is cached.
    pub fn stats(&self, store: &dyn DataStore) -> StoreResult<Option<PlayerStats>> {
        match store.get(categories::PLAYER_STATS, &self.steam_id())? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn set_stats(&self, store: &mut dyn DataStore, stats: &PlayerStats) -> StoreResult<()> {
        store.set(
            categories::PLAYER_STATS,
            &self.steam_id(),
            serde_json::to_value(stats)?,
        )
    }

    // ================================================================
    // Moderation
    // ================================================================

    pub fn kick(&self, reason: &str) {
        debug!(player_id = %self.id(), reason, "Kicking player");
        self.native.kick(reason);
    }

    pub fn reject(&self, reason: &str) {
        self.native.reject(reason);
    }

    /// Bans the player, saves the list and kicks the connection. A failed
    /// save is logged; the ban still applies for this session.
    pub fn ban(&self, users: &mut dyn PermissionList, reason: &str) {
        users.set(self.id(), UserGroup::Banned, &self.name(), reason);
        if let Err(e) = users.save() {
            warn!(player_id = %self.id(), "Failed to save ban list: {}", e);
        }
        self.kick("Banned!");
    }

    pub fn make_none(&self, users: &mut dyn PermissionList, reason: &str) {
        self.set_group(users, UserGroup::None, reason);
    }

    pub fn make_moderator(&self, users: &mut dyn PermissionList, reason: &str) {
        self.set_group(users, UserGroup::Moderator, reason);
    }

    pub fn make_owner(&self, users: &mut dyn PermissionList, reason: &str) {
        self.set_group(users, UserGroup::Owner, reason);
    }

    fn set_group(&self, users: &mut dyn PermissionList, group: UserGroup, reason: &str) {
        users.set(self.id(), group, &self.name(), reason);
        self.native.set_auth_level(group.auth_level());
        if let Err(e) = users.save() {
            warn!(player_id = %self.id(), %group, "Failed to save user list: {}", e);
        }
    }

    /// Kills the player as a suicide.
    pub fn kill(&self) {
        let info = HitInfo::new(0.0, DamageType::Suicide).with_initiator(Initiator::Player(self.id()));
        self.native.die(&info);
    }

    // ================================================================
    // Messaging
    // ================================================================

    pub fn message(&self, msg: &str) {
        self.message_from(DEFAULT_MESSAGE_NAME, msg);
    }

    pub fn message_from(&self, from: &str, msg: &str) {
        self.native
            .send_console_command(&format!("chat.add {} {}", quote_safe(from), quote_safe(msg)));
    }

    pub fn console_message(&self, msg: &str) {
        self.send_console_command(&format!("echo {}", msg));
    }

    pub fn send_console_command(&self, command: &str) {
        self.native.send_console_command(&quote_safe(command));
    }

    // ================================================================
    // Teleport
    // ================================================================

    /// Teleports the player, anchoring long jumps (see [`teleport`]).
    /// Returns the anchor the player passed through, if any.
    pub fn teleport(&self, destination: Vec3) -> Option<Vec3> {
        teleport::relocate(self.native, &teleport::ANCHORS, destination)
    }

    pub fn teleport_to(&self, x: f32, y: f32, z: f32) -> Option<Vec3> {
        self.teleport(Vec3::new(x, y, z))
    }

    /// Teleports to `(x, z)` at ground level.
    pub fn ground_teleport(&self, terrain: &dyn Terrain, x: f32, z: f32) -> Option<Vec3> {
        self.teleport(Vec3::new(x, terrain.ground_height(x, z), z))
    }
}

impl PartialEq for Player<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Player<'_> {}

impl fmt::Debug for Player<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

impl fmt::Display for Player<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}
