use crate::SimPlayer;
use pluton_engine::{
    Console, ConsoleArg, NativeEntity, NativeItem, NativePlayer, PlayerDirectory, Terrain,
};
use pluton_types::{NetId, PlayerId, Vec3};
use std::cell::RefCell;

/// Records every console broadcast.
#[derive(Debug, Default)]
pub struct SimConsole {
    broadcasts: RefCell<Vec<String>>,
}

impl SimConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.broadcasts.borrow().clone()
    }
}

impl Console for SimConsole {
    fn broadcast(&self, command: &str) {
        self.broadcasts.borrow_mut().push(command.to_string());
    }
}

/// A flat world holding the simulated players.
#[derive(Debug, Default)]
pub struct SimWorld {
    players: Vec<SimPlayer>,
    ground: f32,
    console: SimConsole,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the terrain height returned for every `(x, z)`.
    pub fn with_ground(mut self, height: f32) -> Self {
        self.ground = height;
        self
    }

    pub fn add_player(&mut self, player: SimPlayer) -> &SimPlayer {
        self.players.push(player);
        &self.players[self.players.len() - 1]
    }

    /// Looks up a player regardless of whether it is online.
    pub fn player(&self, id: PlayerId) -> Option<&SimPlayer> {
        self.players.iter().find(|p| p.user_id() == id)
    }

    pub fn players(&self) -> &[SimPlayer] {
        &self.players
    }

    pub fn console(&self) -> &SimConsole {
        &self.console
    }
}

impl PlayerDirectory for SimWorld {
    fn online_players(&self) -> Vec<&dyn NativePlayer> {
        self.players
            .iter()
            .filter(|p| p.is_online())
            .map(|p| p as &dyn NativePlayer)
            .collect()
    }
}

impl Terrain for SimWorld {
    fn ground_height(&self, _x: f32, _z: f32) -> f32 {
        self.ground
    }
}

impl Console for SimWorld {
    fn broadcast(&self, command: &str) {
        self.console.broadcast(command);
    }
}

/// A `chat.say` style console invocation.
#[derive(Debug)]
pub struct SimConsoleArg {
    args_str: String,
    args: Vec<String>,
    replies: RefCell<Vec<String>>,
}

impl SimConsoleArg {
    /// Builds the invocation the client sends for a chat line: the text is
    /// the single, quoted argument.
    pub fn chat(text: &str) -> Self {
        Self {
            args_str: format!("\"{}\"", text),
            args: vec![text.to_string()],
            replies: RefCell::new(Vec::new()),
        }
    }

    pub fn new(args_str: &str, args: &[&str]) -> Self {
        Self {
            args_str: args_str.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            replies: RefCell::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.borrow().clone()
    }
}

impl ConsoleArg for SimConsoleArg {
    fn args_str(&self) -> &str {
        &self.args_str
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn reply_with(&self, reply: &str) {
        self.replies.borrow_mut().push(reply.to_string());
    }
}

/// Any other entity (building block, corpse, loot container).
#[derive(Debug, Clone)]
pub struct SimEntity {
    pub id: NetId,
    pub prefab: String,
    pub position: Vec3,
}

impl SimEntity {
    pub fn new(id: u32, prefab: &str) -> Self {
        Self {
            id: NetId::new(id),
            prefab: prefab.to_string(),
            position: Vec3::ZERO,
        }
    }
}

impl NativeEntity for SimEntity {
    fn net_id(&self) -> NetId {
        self.id
    }

    fn prefab_name(&self) -> String {
        self.prefab.clone()
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[derive(Debug, Clone)]
pub struct SimItem {
    pub name: String,
    pub amount: u32,
}

impl NativeItem for SimItem {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn amount(&self) -> u32 {
        self.amount
    }
}
