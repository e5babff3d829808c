//! Engine callback entry points.
//!
//! Each hook checks its preconditions, wraps the native actors, publishes one
//! typed event and then applies the state change this layer is authoritative
//! for. Being-damaged hooks publish before the mutation; has-died hooks
//! publish after the engine already finalized the death.

use crate::bus::{DispatchReport, EventBus};
use crate::config::HookConfig;
use crate::error::Result;
use crate::events::{
    ChatEvent, CommandEvent, GatherEvent, NpcDeathEvent, NpcHurtEvent, PlayerConnectedEvent,
    PlayerDeathEvent, PlayerDisconnectedEvent, PlayerHurtEvent,
};
use crate::presence::PresenceRegistry;
use pluton_engine::{
    Console, ConsoleArg, DataStore, NativeAnimal, NativeEntity, NativeItem, NativePlayer,
    NativeResource,
};
use pluton_entity::{Npc, Player, Resource};
use pluton_types::{DamageType, HitInfo, Initiator, quote_safe};
use tracing::{debug, info, trace, warn};

/// Effect played on a player after every accepted hit.
pub const HIT_EFFECT: &str = "takedamage_hit";

/// Why a hook returned without publishing or mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The hook ran outside the server realm.
    NotAuthoritative,
    /// The target had no health left, or the player was already dead.
    TargetDead,
    /// The engine's attack test refused the hit.
    AttackRejected,
    /// The hit carried no damage.
    NoDamage,
    /// A command line with no tokens, or only slashes as command name.
    EmptyCommand,
}

/// Result of one hook invocation. The engine may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Skipped(SkipReason),
    Completed { report: DispatchReport },
}

impl HookOutcome {
    fn done() -> Self {
        Self::Completed {
            report: DispatchReport::default(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn report(&self) -> Option<DispatchReport> {
        match self {
            Self::Completed { report } => Some(*report),
            Self::Skipped(_) => None,
        }
    }
}

fn skipped(hook: &'static str, reason: SkipReason) -> HookOutcome {
    trace!(hook, ?reason, "Hook skipped");
    HookOutcome::Skipped(reason)
}

fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    if from == to {
        return 0.0;
    }
    ((value - from) / (to - from)).clamp(0.0, 1.0)
}

/// Routes engine callbacks to subscribers and owns the presence state.
pub struct HookDispatcher {
    bus: EventBus,
    presence: PresenceRegistry,
    config: HookConfig,
    store: Box<dyn DataStore>,
}

impl HookDispatcher {
    pub fn new(config: HookConfig, store: Box<dyn DataStore>) -> Self {
        Self {
            bus: EventBus::new(),
            presence: PresenceRegistry::new(),
            config,
            store,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn DataStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn DataStore {
        self.store.as_mut()
    }

    /// Writes every pending offline record to the store, so the next
    /// disconnect of the same identity continues from it.
    pub fn persist_presence(&mut self) -> Result<usize> {
        self.presence.persist(self.store.as_mut())
    }

    fn is_authoritative(&self) -> bool {
        self.config.realm().is_server()
    }

    fn wrap<'a>(&mut self, native: &'a dyn NativePlayer) -> Player<'a> {
        Player::with_stats(native, self.store.as_mut())
    }

    /// No-op extension point: only the authority guard applies.
    fn extension_point(&self, hook: &'static str) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped(hook, SkipReason::NotAuthoritative);
        }
        HookOutcome::done()
    }

    // ================================================================
    // Chat
    // ================================================================

    /// `chat.say`. Lines starting with `/` go to [`HookDispatcher::command`].
    pub fn chat(
        &mut self,
        player: &dyn NativePlayer,
        arg: &dyn ConsoleArg,
        console: &dyn Console,
    ) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("chat", SkipReason::NotAuthoritative);
        }
        if arg.args_str().starts_with("\"/") {
            let tokens: Vec<String> = arg
                .args()
                .iter()
                .flat_map(|a| a.split_whitespace())
                .map(str::to_string)
                .collect();
            return self.command(player, &tokens);
        }

        let player = self.wrap(player);
        let text = arg.args().first().cloned().unwrap_or_default();
        let (message, broadcast) = if !self.config.chat.enabled {
            arg.reply_with("Chat is disabled.");
            (text, false)
        } else {
            let name = player.name();
            let message: String = text.chars().take(self.config.chat.max_length).collect();
            if self.config.chat.server_log {
                info!("{}: {}", name, message);
            }
            console.broadcast(&format!(
                "chat.add {} {}",
                quote_safe(&name),
                quote_safe(&message)
            ));
            arg.reply_with("chat.say was executed");
            (message, true)
        };

        let mut event = ChatEvent {
            player,
            message,
            broadcast,
        };
        let report = self.bus.chat.dispatch(|h| h(&mut event));
        HookOutcome::Completed { report }
    }

    /// A tokenized command line. The first token with every `/` removed is
    /// the command name.
    pub fn command(&mut self, player: &dyn NativePlayer, args: &[String]) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("command", SkipReason::NotAuthoritative);
        }
        let Some((first, rest)) = args.split_first() else {
            return skipped("command", SkipReason::EmptyCommand);
        };
        let command = first.replace('/', "");
        if command.is_empty() {
            return skipped("command", SkipReason::EmptyCommand);
        }

        let mut event = CommandEvent {
            player: self.wrap(player),
            command,
            args: rest.to_vec(),
        };
        debug!(player_id = %event.player.id(), command = %event.command, "Command");
        let report = self.bus.command.dispatch(|h| h(&mut event));
        HookOutcome::Completed { report }
    }

    // ================================================================
    // Resources and NPCs
    // ================================================================

    /// A resource node was hit. Subscribers see the health before the hit.
    pub fn gathering(&mut self, resource: &dyn NativeResource, info: &HitInfo) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("gathering", SkipReason::NotAuthoritative);
        }
        if resource.health() <= 0.0 {
            return skipped("gathering", SkipReason::TargetDead);
        }

        let mut event = GatherEvent {
            resource: Resource::new(resource),
            info,
        };
        let report = self.bus.gather.dispatch(|h| h(&mut event));

        let health = resource.health() - info.gather_damage();
        resource.set_health(health);
        if health <= 0.0 {
            debug!(resource = %resource.net_id(), "Resource depleted");
            resource.kill();
        } else {
            resource.update_network_stage();
        }
        HookOutcome::Completed { report }
    }

    /// An animal was hit. Only non-lethal hits are published.
    pub fn npc_hurt(&mut self, animal: &dyn NativeAnimal, info: &HitInfo) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("npc_hurt", SkipReason::NotAuthoritative);
        }
        if animal.health() <= 0.0 {
            return skipped("npc_hurt", SkipReason::TargetDead);
        }

        let report = if animal.health() - info.damage_amount > 0.0 {
            let mut event = NpcHurtEvent {
                npc: Npc::new(animal),
                info,
            };
            self.bus.npc_hurt.dispatch(|h| h(&mut event))
        } else {
            DispatchReport::default()
        };

        let health = animal.health() - info.damage_amount;
        animal.set_health(health);
        if health <= 0.0 {
            animal.die(info);
        }
        HookOutcome::Completed { report }
    }

    /// The engine finished killing an animal.
    pub fn npc_died(&mut self, animal: &dyn NativeAnimal, info: Option<HitInfo>) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("npc_died", SkipReason::NotAuthoritative);
        }
        let info = info.unwrap_or_else(|| {
            HitInfo::fallback(DamageType::Generic, Initiator::Entity(animal.net_id()))
        });

        let mut event = NpcDeathEvent {
            npc: Npc::new(animal),
            info: &info,
        };
        let report = self.bus.npc_died.dispatch(|h| h(&mut event));
        HookOutcome::Completed { report }
    }

    // ================================================================
    // Players
    // ================================================================

    pub fn player_connected(&mut self, player: &dyn NativePlayer) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("player_connected", SkipReason::NotAuthoritative);
        }
        let previous = self.presence.on_connect(player.user_id());
        if let Some(record) = &previous {
            if let Err(e) = PresenceRegistry::save_record(record, self.store.as_mut()) {
                warn!(player_id = %record.id, "Couldn't save offline record: {}", e);
            }
        }

        let mut event = PlayerConnectedEvent {
            player: self.wrap(player),
            previous,
        };
        info!(player_id = %event.player.id(), "Player connected");
        let report = self.bus.player_connected.dispatch(|h| h(&mut event));
        HookOutcome::Completed { report }
    }

    pub fn player_disconnected(&mut self, player: &dyn NativePlayer) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("player_disconnected", SkipReason::NotAuthoritative);
        }
        let player = self.wrap(player);
        let record = self.presence.on_disconnect(&player, self.store.as_ref());

        let mut event = PlayerDisconnectedEvent { player, record };
        info!(player_id = %player.id(), "Player disconnected");
        let report = self.bus.player_disconnected.dispatch(|h| h(&mut event));
        HookOutcome::Completed { report }
    }

    /// The engine finished killing a player. The inventory is stripped
    /// afterwards when a subscriber cleared `drop_loot`.
    pub fn player_died(&mut self, player: &dyn NativePlayer, info: Option<HitInfo>) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("player_died", SkipReason::NotAuthoritative);
        }
        let info = info.unwrap_or_else(|| {
            HitInfo::fallback(player.last_damage(), Initiator::Player(player.user_id()))
        });

        let mut event = PlayerDeathEvent::new(self.wrap(player), &info);
        let report = self.bus.player_died.dispatch(|h| h(&mut event));

        if !event.drop_loot() {
            debug!(player_id = %player.user_id(), "Stripping inventory");
            player.strip_inventory();
        }
        HookOutcome::Completed { report }
    }

    /// A player was attacked. Subscribers run before any vital changes.
    pub fn player_hurt(&mut self, player: &dyn NativePlayer, info: Option<HitInfo>) -> HookOutcome {
        if !self.is_authoritative() {
            return skipped("player_hurt", SkipReason::NotAuthoritative);
        }
        if player.is_dead() || player.health() <= 0.0 {
            return skipped("player_hurt", SkipReason::TargetDead);
        }
        let info = info.unwrap_or_else(|| {
            HitInfo::fallback(player.last_damage(), Initiator::Player(player.user_id()))
        });
        if !player.test_attack(&info) {
            return skipped("player_hurt", SkipReason::AttackRejected);
        }
        if info.damage_amount <= 0.0 {
            return skipped("player_hurt", SkipReason::NoDamage);
        }

        let mut event = PlayerHurtEvent {
            victim: self.wrap(player),
            info: &info,
        };
        let report = self.bus.player_hurt.dispatch(|h| h(&mut event));

        let damage = info.damage_amount;
        player.add_bleeding(inverse_lerp(0.0, 100.0, damage));
        player.subtract_health(damage);
        player.take_damage_indicator(damage, player.position() - info.point_start);
        player.check_death_condition(&info);
        player.send_effect(HIT_EFFECT);
        HookOutcome::Completed { report }
    }

    // ================================================================
    // Extension points
    // ================================================================

    pub fn player_take_damage(
        &mut self,
        player: &dyn NativePlayer,
        amount: f32,
        damage_type: DamageType,
    ) -> HookOutcome {
        trace!(player_id = %player.user_id(), amount, ?damage_type, "Player taking damage");
        self.extension_point("player_take_damage")
    }

    pub fn player_take_damage_generic(&mut self, player: &dyn NativePlayer, amount: f32) -> HookOutcome {
        self.player_take_damage(player, amount, DamageType::Generic)
    }

    pub fn player_take_radiation(&mut self, player: &dyn NativePlayer, amount: f32) -> HookOutcome {
        debug!("{} is taking {} radiation damage", player.display_name(), amount);
        self.extension_point("player_take_radiation")
    }

    pub fn entity_attacked(&mut self, block: &dyn NativeEntity, info: &HitInfo) -> HookOutcome {
        trace!(entity = %block.net_id(), damage = info.damage_amount, "Building block attacked");
        self.extension_point("entity_attacked")
    }

    pub fn entity_frame_deployed(&mut self, block: &dyn NativeEntity) -> HookOutcome {
        trace!(entity = %block.net_id(), "Building frame deployed");
        self.extension_point("entity_frame_deployed")
    }

    pub fn entity_built(&mut self, block: &dyn NativeEntity) -> HookOutcome {
        trace!(entity = %block.net_id(), "Building block built");
        self.extension_point("entity_built")
    }

    /// Called on every construction-tool hit on a building block.
    pub fn entity_building_update(
        &mut self,
        block: &dyn NativeEntity,
        player: &dyn NativePlayer,
        proficiency: f32,
    ) -> HookOutcome {
        trace!(
            entity = %block.net_id(),
            player_id = %player.user_id(),
            proficiency,
            "Building update"
        );
        self.extension_point("entity_building_update")
    }

    pub fn corpse_init(&mut self, corpse: &dyn NativeEntity, parent: &dyn NativeEntity) -> HookOutcome {
        trace!(corpse = %corpse.net_id(), parent = %parent.net_id(), "Corpse initialized");
        self.extension_point("corpse_init")
    }

    pub fn corpse_hit(&mut self, corpse: &dyn NativeEntity, info: &HitInfo) -> HookOutcome {
        trace!(corpse = %corpse.net_id(), damage = info.damage_amount, "Corpse hit");
        self.extension_point("corpse_hit")
    }

    pub fn start_looting_entity(
        &mut self,
        looter: &dyn NativePlayer,
        target: &dyn NativeEntity,
    ) -> HookOutcome {
        debug!("{} is looting {}", looter.display_name(), target.prefab_name());
        self.extension_point("start_looting_entity")
    }

    pub fn start_looting_player(
        &mut self,
        looter: &dyn NativePlayer,
        looted: &dyn NativePlayer,
    ) -> HookOutcome {
        debug!("{} is looting {}", looter.display_name(), looted.display_name());
        self.extension_point("start_looting_player")
    }

    pub fn start_looting_item(&mut self, looter: &dyn NativePlayer, item: &dyn NativeItem) -> HookOutcome {
        trace!(player_id = %looter.user_id(), item = %item.name(), "Looting item");
        self.extension_point("start_looting_item")
    }
}

impl std::fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("bus", &self.bus)
            .field("presence", &self.presence)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
