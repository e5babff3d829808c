use pluton_engine::NativePlayer;
use pluton_types::{DamageType, HitInfo, PlayerId, Vec3};
use std::cell::RefCell;

/// Engine-side effect recorded by [`SimPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCall {
    SetPosition(Vec3),
    SetHealth(f32),
    UpdateNetworkGroup,
    UpdateCollider,
    FullSnapshot,
    InventorySnapshot,
    SnapshotsSuppressed(bool),
    ConsoleCommand(String),
    SetAuthLevel(u8),
    Kick(String),
    Reject(String),
    AddBleeding(f32),
    SubtractHealth(f32),
    DamageIndicator { amount: f32, direction: Vec3 },
    CheckDeathCondition,
    Die(HitInfo),
    Effect(String),
    StripInventory,
}

#[derive(Debug, Clone)]
struct State {
    name: String,
    ip: String,
    os: String,
    ping: u32,
    auth_status: String,
    connection_time: f32,
    admin: bool,
    online: bool,
    position: Vec3,
    health: f32,
    dead: bool,
    last_damage: DamageType,
    bleeding: f32,
    attackable: bool,
    look_point: Option<Vec3>,
    inventory: Vec<String>,
    pending_death: Option<HitInfo>,
}

/// Scriptable [`NativePlayer`].
#[derive(Debug)]
pub struct SimPlayer {
    id: PlayerId,
    state: RefCell<State>,
    journal: RefCell<Vec<PlayerCall>>,
}

impl SimPlayer {
    /// A healthy, online player at the origin with an empty inventory.
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id: PlayerId::new(id),
            state: RefCell::new(State {
                name: name.to_string(),
                ip: "127.0.0.1".to_string(),
                os: "linux".to_string(),
                ping: 30,
                auth_status: "ok".to_string(),
                connection_time: 0.0,
                admin: false,
                online: true,
                position: Vec3::ZERO,
                health: 100.0,
                dead: false,
                last_damage: DamageType::Generic,
                bleeding: 0.0,
                attackable: true,
                look_point: None,
                inventory: Vec::new(),
                pending_death: None,
            }),
            journal: RefCell::new(Vec::new()),
        }
    }

    // ── builder ─────────────────────────────────────────────────

    pub fn at(self, position: Vec3) -> Self {
        self.state.borrow_mut().position = position;
        self
    }

    pub fn with_health(self, health: f32) -> Self {
        self.state.borrow_mut().health = health;
        self
    }

    pub fn with_ip(self, ip: &str) -> Self {
        self.state.borrow_mut().ip = ip.to_string();
        self
    }

    pub fn with_items(self, items: &[&str]) -> Self {
        self.state.borrow_mut().inventory = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_last_damage(self, damage_type: DamageType) -> Self {
        self.state.borrow_mut().last_damage = damage_type;
        self
    }

    pub fn with_look_point(self, point: Vec3) -> Self {
        self.state.borrow_mut().look_point = Some(point);
        self
    }

    pub fn admin(self) -> Self {
        self.state.borrow_mut().admin = true;
        self
    }

    /// Makes the engine's attack test reject every hit.
    pub fn invulnerable(self) -> Self {
        self.state.borrow_mut().attackable = false;
        self
    }

    // ── scripted engine changes ─────────────────────────────────

    pub fn set_name(&self, name: &str) {
        self.state.borrow_mut().name = name.to_string();
    }

    pub fn set_online(&self, online: bool) {
        self.state.borrow_mut().online = online;
    }

    pub fn set_connection_time(&self, seconds: f32) {
        self.state.borrow_mut().connection_time = seconds;
    }

    /// Moves the player the way the simulation would, without journaling.
    pub fn walk_to(&self, position: Vec3) {
        self.state.borrow_mut().position = position;
    }

    /// Revives a dead player with full health.
    pub fn respawn(&self, position: Vec3) {
        let mut state = self.state.borrow_mut();
        state.dead = false;
        state.health = 100.0;
        state.position = position;
    }

    // ── inspection ──────────────────────────────────────────────

    pub fn is_online(&self) -> bool {
        self.state.borrow().online
    }

    pub fn bleeding(&self) -> f32 {
        self.state.borrow().bleeding
    }

    pub fn items(&self) -> Vec<String> {
        self.state.borrow().inventory.clone()
    }

    /// Death the engine ran since the last call, for the caller to report
    /// through the player-died hook.
    pub fn take_pending_death(&self) -> Option<HitInfo> {
        self.state.borrow_mut().pending_death.take()
    }

    pub fn journal(&self) -> Vec<PlayerCall> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    /// Positions set through the engine interface, in order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|c| match c {
                PlayerCall::SetPosition(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &PlayerCall) -> usize {
        self.journal.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn network_refreshes(&self) -> usize {
        self.count(&PlayerCall::UpdateNetworkGroup)
    }

    pub fn strip_count(&self) -> usize {
        self.count(&PlayerCall::StripInventory)
    }

    pub fn console_commands(&self) -> Vec<String> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|c| match c {
                PlayerCall::ConsoleCommand(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlayerCall) {
        self.journal.borrow_mut().push(call);
    }
}

impl NativePlayer for SimPlayer {
    fn user_id(&self) -> PlayerId {
        self.id
    }

    fn display_name(&self) -> String {
        self.state.borrow().name.clone()
    }

    fn is_admin(&self) -> bool {
        self.state.borrow().admin
    }

    fn ip_address(&self) -> String {
        self.state.borrow().ip.clone()
    }

    fn os(&self) -> String {
        self.state.borrow().os.clone()
    }

    fn ping(&self) -> u32 {
        self.state.borrow().ping
    }

    fn auth_status(&self) -> String {
        self.state.borrow().auth_status.clone()
    }

    fn connection_time(&self) -> f32 {
        self.state.borrow().connection_time
    }

    fn set_auth_level(&self, level: u8) {
        self.record(PlayerCall::SetAuthLevel(level));
    }

    fn kick(&self, reason: &str) {
        self.state.borrow_mut().online = false;
        self.record(PlayerCall::Kick(reason.to_string()));
    }

    fn reject(&self, reason: &str) {
        self.record(PlayerCall::Reject(reason.to_string()));
    }

    fn position(&self) -> Vec3 {
        self.state.borrow().position
    }

    fn set_position(&self, position: Vec3) {
        self.state.borrow_mut().position = position;
        self.record(PlayerCall::SetPosition(position));
    }

    fn health(&self) -> f32 {
        self.state.borrow().health
    }

    fn set_health(&self, health: f32) {
        self.state.borrow_mut().health = health;
        self.record(PlayerCall::SetHealth(health));
    }

    fn is_dead(&self) -> bool {
        self.state.borrow().dead
    }

    fn last_damage(&self) -> DamageType {
        self.state.borrow().last_damage
    }

    fn add_bleeding(&self, amount: f32) {
        self.state.borrow_mut().bleeding += amount;
        self.record(PlayerCall::AddBleeding(amount));
    }

    fn subtract_health(&self, amount: f32) {
        self.state.borrow_mut().health -= amount;
        self.record(PlayerCall::SubtractHealth(amount));
    }

    fn test_attack(&self, _info: &HitInfo) -> bool {
        self.state.borrow().attackable
    }

    fn take_damage_indicator(&self, amount: f32, direction: Vec3) {
        self.record(PlayerCall::DamageIndicator { amount, direction });
    }

    fn check_death_condition(&self, info: &HitInfo) {
        self.record(PlayerCall::CheckDeathCondition);
        let lethal = {
            let state = self.state.borrow();
            !state.dead && state.health <= 0.0
        };
        if lethal {
            self.die(info);
        }
    }

    fn die(&self, info: &HitInfo) {
        {
            let mut state = self.state.borrow_mut();
            state.dead = true;
            state.health = 0.0;
            state.last_damage = info.damage_type;
            state.pending_death = Some(info.clone());
        }
        self.record(PlayerCall::Die(info.clone()));
    }

    fn send_effect(&self, effect: &str) {
        self.record(PlayerCall::Effect(effect.to_string()));
    }

    fn set_snapshots_suppressed(&self, suppressed: bool) {
        self.record(PlayerCall::SnapshotsSuppressed(suppressed));
    }

    fn update_network_group(&self) {
        self.record(PlayerCall::UpdateNetworkGroup);
    }

    fn update_collider(&self) {
        self.record(PlayerCall::UpdateCollider);
    }

    fn send_full_snapshot(&self) {
        self.record(PlayerCall::FullSnapshot);
    }

    fn send_inventory_snapshot(&self) {
        self.record(PlayerCall::InventorySnapshot);
    }

    fn send_console_command(&self, command: &str) {
        self.record(PlayerCall::ConsoleCommand(command.to_string()));
    }

    fn inventory_len(&self) -> usize {
        self.state.borrow().inventory.len()
    }

    fn strip_inventory(&self) {
        self.state.borrow_mut().inventory.clear();
        self.record(PlayerCall::StripInventory);
    }

    fn look_point(&self, _max_distance: f32) -> Option<Vec3> {
        self.state.borrow().look_point
    }
}
