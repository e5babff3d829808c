//! Scenario replay host.
//!
//! Builds an in-memory world from a JSON scenario, feeds every step through a
//! [`HookDispatcher`] the way the engine would, and reports what subscribers
//! saw. Deaths the engine runs as a consequence of a hit are reported back
//! through the matching has-died hook, like the real engine does.

use pluton_engine::{MemoryStore, NativeAnimal, NativeResource};
use pluton_entity::Player;
use pluton_hooks::{EventBus, HookConfig, HookDispatcher, HookError, HookOutcome};
use pluton_sim::{SimAnimal, SimConsoleArg, SimPlayer, SimResource, SimWorld};
use pluton_types::{HitInfo, NetId, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("step {step}: unknown player {id}")]
    UnknownPlayer { step: usize, id: u64 },

    #[error("step {step}: unknown animal {id}")]
    UnknownAnimal { step: usize, id: u32 },

    #[error("step {step}: unknown resource {id}")]
    UnknownResource { step: usize, id: u32 },

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error(transparent)]
    Hook(#[from] HookError),
}

pub type Result<T> = std::result::Result<T, ReplayError>;

fn full_health() -> f32 {
    100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSpec {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "full_health")]
    pub health: f32,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub admin: bool,
}

impl PlayerSpec {
    fn build(&self) -> SimPlayer {
        let items: Vec<&str> = self.items.iter().map(String::as_str).collect();
        let player = SimPlayer::new(self.id, &self.name)
            .at(self.position)
            .with_health(self.health)
            .with_items(&items);
        if self.admin { player.admin() } else { player }
    }
}

/// An animal or a resource node.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySpec {
    pub id: u32,
    pub name: String,
    pub health: f32,
    #[serde(default)]
    pub position: Vec3,
}

/// One engine callback, or a plugin-side action between callbacks.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
pub enum Step {
    PlayerConnected { player: u64 },
    PlayerDisconnected { player: u64 },
    Chat { player: u64, text: String },
    Command { player: u64, args: Vec<String> },
    Gathering { resource: u32, hit: HitInfo },
    NpcHurt { animal: u32, hit: HitInfo },
    PlayerHurt {
        player: u64,
        #[serde(default)]
        hit: Option<HitInfo>,
    },
    PlayerTakeRadiation { player: u64, amount: f32 },
    Kill { player: u64 },
    Teleport { player: u64, to: Vec3 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Terrain height everywhere.
    #[serde(default)]
    pub ground: f32,
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub animals: Vec<EntitySpec>,
    #[serde(default)]
    pub resources: Vec<EntitySpec>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// What happened during a replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: usize,
    /// Hook invocations, including has-died hooks run after lethal hits.
    pub hooks: usize,
    pub skipped: usize,
    pub delivered: usize,
    pub faulted: usize,
    /// Players disconnected at the end of the run.
    pub offline: usize,
    /// One line per published event, in publication order.
    pub events: Vec<String>,
}

impl ReplayReport {
    fn record(&mut self, outcome: HookOutcome) {
        self.hooks += 1;
        match outcome.report() {
            Some(report) => {
                self.delivered += report.delivered;
                self.faulted += report.faulted;
            }
            None => self.skipped += 1,
        }
    }
}

/// Subscribes a logger to every event type; each subscriber appends one line
/// to `lines`.
pub fn install_event_log(bus: &mut EventBus, lines: &Rc<RefCell<Vec<String>>>) {
    let log = Rc::clone(lines);
    bus.on_player_connected(move |e| {
        push(&log, format!("connected {}", e.player));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_player_disconnected(move |e| {
        push(
            &log,
            format!("disconnected {} online={}s", e.player, e.record.total_time_online),
        );
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_chat(move |e| {
        push(&log, format!("chat {}: {}", e.player.name(), e.message));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_command(move |e| {
        push(&log, format!("command {} /{} {}", e.player.name(), e.command, e.args.join(" ")));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_gather(move |e| {
        push(&log, format!("gather {} -{}", e.resource.name(), e.damage()));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_npc_hurt(move |e| {
        push(&log, format!("npc_hurt {} -{}", e.npc.name(), e.info.damage_amount));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_npc_died(move |e| {
        push(&log, format!("npc_died {}", e.npc.name()));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_player_hurt(move |e| {
        push(&log, format!("player_hurt {} -{}", e.victim.name(), e.info.damage_amount));
        Ok(())
    });
    let log = Rc::clone(lines);
    bus.on_player_died(move |e| {
        push(&log, format!("player_died {} {:?}", e.victim.name(), e.info.damage_type));
        Ok(())
    });
}

fn push(lines: &Rc<RefCell<Vec<String>>>, line: String) {
    info!("{}", line);
    lines.borrow_mut().push(line);
}

struct World {
    sim: SimWorld,
    animals: Vec<SimAnimal>,
    resources: Vec<SimResource>,
}

impl World {
    fn build(scenario: &Scenario) -> Self {
        let mut sim = SimWorld::new().with_ground(scenario.ground);
        for spec in &scenario.players {
            sim.add_player(spec.build());
        }
        let animals = scenario
            .animals
            .iter()
            .map(|a| SimAnimal::new(a.id, &a.name, a.health).at(a.position))
            .collect();
        let resources = scenario
            .resources
            .iter()
            .map(|r| SimResource::new(r.id, &r.name, r.health).at(r.position))
            .collect();
        Self {
            sim,
            animals,
            resources,
        }
    }

    fn player(&self, step: usize, id: u64) -> Result<&SimPlayer> {
        self.sim
            .player(id.into())
            .ok_or(ReplayError::UnknownPlayer { step, id })
    }

    fn animal(&self, step: usize, id: u32) -> Result<&SimAnimal> {
        self.animals
            .iter()
            .find(|a| a.net_id() == NetId::new(id))
            .ok_or(ReplayError::UnknownAnimal { step, id })
    }

    fn resource(&self, step: usize, id: u32) -> Result<&SimResource> {
        self.resources
            .iter()
            .find(|r| r.net_id() == NetId::new(id))
            .ok_or(ReplayError::UnknownResource { step, id })
    }
}

/// Reports a death the engine ran during the previous callback.
fn report_player_death(hooks: &mut HookDispatcher, player: &SimPlayer, report: &mut ReplayReport) {
    if let Some(info) = player.take_pending_death() {
        report.record(hooks.player_died(player, Some(info)));
    }
}

/// Runs `scenario` against a fresh dispatcher and in-memory store.
pub fn replay(config: HookConfig, scenario: &Scenario) -> Result<ReplayReport> {
    let world = World::build(scenario);
    let mut hooks = HookDispatcher::new(config, Box::new(MemoryStore::new()));
    let lines = Rc::new(RefCell::new(Vec::new()));
    install_event_log(hooks.bus_mut(), &lines);

    let mut report = ReplayReport::default();
    for (index, step) in scenario.steps.iter().enumerate() {
        debug!(step = index, ?step, "Replaying");
        match step {
            Step::PlayerConnected { player } => {
                let native = world.player(index, *player)?;
                native.set_online(true);
                report.record(hooks.player_connected(native));
            }
            Step::PlayerDisconnected { player } => {
                let native = world.player(index, *player)?;
                native.set_online(false);
                report.record(hooks.player_disconnected(native));
            }
            Step::Chat { player, text } => {
                let native = world.player(index, *player)?;
                let arg = SimConsoleArg::chat(text);
                report.record(hooks.chat(native, &arg, &world.sim));
            }
            Step::Command { player, args } => {
                let native = world.player(index, *player)?;
                report.record(hooks.command(native, args));
            }
            Step::Gathering { resource, hit } => {
                let node = world.resource(index, *resource)?;
                report.record(hooks.gathering(node, hit));
            }
            Step::NpcHurt { animal, hit } => {
                let native = world.animal(index, *animal)?;
                report.record(hooks.npc_hurt(native, hit));
                if let Some(info) = native.take_pending_death() {
                    report.record(hooks.npc_died(native, Some(info)));
                }
            }
            Step::PlayerHurt { player, hit } => {
                let native = world.player(index, *player)?;
                report.record(hooks.player_hurt(native, hit.clone()));
                report_player_death(&mut hooks, native, &mut report);
            }
            Step::PlayerTakeRadiation { player, amount } => {
                let native = world.player(index, *player)?;
                report.record(hooks.player_take_radiation(native, *amount));
            }
            Step::Kill { player } => {
                let native = world.player(index, *player)?;
                Player::new(native).kill();
                report_player_death(&mut hooks, native, &mut report);
            }
            Step::Teleport { player, to } => {
                let player = Player::new(world.player(index, *player)?);
                let anchor = player.teleport(*to);
                push(&lines, format!("teleport {} via {:?}", player.name(), anchor));
            }
        }
        report.steps += 1;
    }

    report.offline = hooks.presence().len();
    hooks.persist_presence()?;
    report.events = lines.borrow().clone();
    Ok(report)
}
