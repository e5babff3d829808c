//! Traits over engine-owned objects.
//!
//! The engine owns every object behind these traits and mutates it on its own
//! tick; the bridge only borrows one for the duration of a hook. All methods
//! take `&self`, so implementations carry their own interior mutability.
//! None of the traits require `Send`: hooks run on the engine's calling
//! thread and never cross it.

use pluton_types::{DamageType, HitInfo, NetId, PlayerId, Vec3};

/// A connected (or sleeping) player object.
pub trait NativePlayer {
    // ── identity ────────────────────────────────────────────────

    fn user_id(&self) -> PlayerId;
    fn display_name(&self) -> String;
    fn is_admin(&self) -> bool;

    // ── connection ──────────────────────────────────────────────

    fn ip_address(&self) -> String;
    fn os(&self) -> String;
    fn ping(&self) -> u32;
    fn auth_status(&self) -> String;
    /// Seconds since the current connection was established.
    fn connection_time(&self) -> f32;
    fn set_auth_level(&self, level: u8);
    fn kick(&self, reason: &str);
    /// Refuses the connection during authentication.
    fn reject(&self, reason: &str);

    // ── transform ───────────────────────────────────────────────

    fn position(&self) -> Vec3;
    fn set_position(&self, position: Vec3);

    // ── vitals ──────────────────────────────────────────────────

    fn health(&self) -> f32;
    fn set_health(&self, health: f32);
    fn is_dead(&self) -> bool;
    /// Damage type of the most recent hit the metabolism recorded.
    fn last_damage(&self) -> DamageType;
    fn add_bleeding(&self, amount: f32);
    fn subtract_health(&self, amount: f32);

    /// Engine-side validation of an incoming attack (god mode, safe zones).
    fn test_attack(&self, info: &HitInfo) -> bool {
        let _ = info;
        true
    }

    /// Shows the on-screen damage direction indicator.
    fn take_damage_indicator(&self, amount: f32, direction: Vec3) {
        let _ = (amount, direction);
    }

    /// Kills the player if its vitals say so. The engine then runs its own
    /// death path, which calls back into the player-died hook.
    fn check_death_condition(&self, info: &HitInfo);

    /// Kills the player unconditionally.
    fn die(&self, info: &HitInfo);

    fn send_effect(&self, effect: &str) {
        let _ = effect;
    }

    // ── networking ──────────────────────────────────────────────

    fn set_snapshots_suppressed(&self, suppressed: bool);
    /// Rebuilds the interest-management visibility group for the current
    /// position.
    fn update_network_group(&self);
    fn update_collider(&self);
    fn send_full_snapshot(&self);
    fn send_inventory_snapshot(&self);
    fn send_console_command(&self, command: &str);

    // ── inventory ───────────────────────────────────────────────

    fn inventory_len(&self) -> usize;
    /// Removes every item from the player's inventory.
    fn strip_inventory(&self);

    /// Point the player is looking at within `max_distance`, as found by the
    /// engine's raycaster.
    fn look_point(&self, max_distance: f32) -> Option<Vec3> {
        let _ = max_distance;
        None
    }
}

/// An animal (NPC) object.
pub trait NativeAnimal {
    fn net_id(&self) -> NetId;
    fn prefab_name(&self) -> String;
    fn position(&self) -> Vec3;
    fn health(&self) -> f32;
    fn set_health(&self, health: f32);
    /// Runs the engine death path, which calls back into the animal-died hook.
    fn die(&self, info: &HitInfo);
}

/// A gatherable resource node (tree, ore, corpse remains).
pub trait NativeResource {
    fn net_id(&self) -> NetId;
    fn prefab_name(&self) -> String;
    fn position(&self) -> Vec3;
    fn health(&self) -> f32;
    fn set_health(&self, health: f32);
    /// Destroys the resource.
    fn kill(&self);
    /// Schedules the depletion-stage network update for a damaged resource.
    fn update_network_stage(&self);
}

/// Any other networked entity (building block, corpse, loot container).
pub trait NativeEntity {
    fn net_id(&self) -> NetId;
    fn prefab_name(&self) -> String;
    fn position(&self) -> Vec3;
}

/// An inventory item.
pub trait NativeItem {
    fn name(&self) -> String;
    fn amount(&self) -> u32;
}

/// Engine lookup of currently connected players.
pub trait PlayerDirectory {
    fn online_players(&self) -> Vec<&dyn NativePlayer>;

    fn find_by_id(&self, id: PlayerId) -> Option<&dyn NativePlayer> {
        self.online_players().into_iter().find(|p| p.user_id() == id)
    }

    /// Resolves a display name, decimal player id or network address.
    ///
    /// Exact matches win over case-insensitive name matches.
    fn find(&self, query: &str) -> Option<&dyn NativePlayer> {
        let players = self.online_players();
        if let Ok(id) = PlayerId::parse(query) {
            if let Some(p) = players.iter().find(|p| p.user_id() == id) {
                return Some(*p);
            }
        }
        players
            .iter()
            .find(|p| p.display_name() == query || p.ip_address() == query)
            .or_else(|| {
                players
                    .iter()
                    .find(|p| p.display_name().eq_ignore_ascii_case(query))
            })
            .copied()
    }
}

/// Height queries against the world terrain.
pub trait Terrain {
    fn ground_height(&self, x: f32, z: f32) -> f32;
}

/// Server console broadcast channel.
pub trait Console {
    /// Sends a console command to every connected client.
    fn broadcast(&self, command: &str);
}

/// One invocation of a console command (e.g. `chat.say`) as received by the
/// engine.
pub trait ConsoleArg {
    /// Raw argument string exactly as typed, including quotes.
    fn args_str(&self) -> &str;
    fn args(&self) -> &[String];
    fn reply_with(&self, reply: &str);
}
