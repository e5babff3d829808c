//! Long-distance teleport anchoring.
//!
//! The engine only rebuilds a player's visibility sets when the player
//! changes network group. A direct jump between two far-apart points can
//! land in a group whose subscriptions were never refreshed, leaving the
//! client with stale entities. Hopping through an anchor far from both ends
//! forces two group changes and a clean rebuild.

use pluton_engine::NativePlayer;
use pluton_types::Vec3;
use tracing::debug;

/// Minimum distance an anchor must keep from both the start and the
/// destination of a teleport.
pub const ANCHOR_DISTANCE: f32 = 1000.0;

/// World corners far away from the spawn area, in scan order.
pub const ANCHORS: [Vec3; 4] = [
    Vec3::new(2000.0, 0.0, 2000.0),
    Vec3::new(-2000.0, 0.0, 2000.0),
    Vec3::new(2000.0, 0.0, -2000.0),
    Vec3::new(-2000.0, 0.0, -2000.0),
];

/// Picks the first anchor, in [`ANCHORS`] order, that lies farther than
/// [`ANCHOR_DISTANCE`] from both `from` and `to`.
pub fn select_anchor(from: Vec3, to: Vec3) -> Option<Vec3> {
    select_anchor_in(&ANCHORS, from, to)
}

/// [`select_anchor`] over an arbitrary anchor set.
pub fn select_anchor_in(anchors: &[Vec3], from: Vec3, to: Vec3) -> Option<Vec3> {
    anchors
        .iter()
        .copied()
        .find(|a| from.distance(*a) > ANCHOR_DISTANCE && to.distance(*a) > ANCHOR_DISTANCE)
}

/// Moves `player` to `destination`, hopping through the first qualifying
/// entry of `anchors` when there is one. Returns the anchor used.
pub fn relocate(player: &dyn NativePlayer, anchors: &[Vec3], destination: Vec3) -> Option<Vec3> {
    let anchor = select_anchor_in(anchors, player.position(), destination);
    match anchor {
        Some(anchor) => {
            debug!(player_id = %player.user_id(), ?anchor, ?destination, "Teleporting via anchor");
            player.set_snapshots_suppressed(true);
            player.set_position(anchor);
            player.update_network_group();

            player.set_position(destination);
            player.update_network_group();
            player.update_collider();
            player.send_full_snapshot();
            player.send_inventory_snapshot();
            player.set_snapshots_suppressed(false);
        }
        None => {
            debug!(player_id = %player.user_id(), ?destination, "Teleporting directly");
            player.set_position(destination);
            player.update_network_group();
        }
    }
    anchor
}
