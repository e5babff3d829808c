use pluton_engine::NativeAnimal;
use pluton_types::{HitInfo, NetId, Vec3};
use std::cell::RefCell;

/// Engine-side effect recorded by [`SimAnimal`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnimalCall {
    SetHealth(f32),
    Die(HitInfo),
}

/// Scriptable [`NativeAnimal`].
#[derive(Debug)]
pub struct SimAnimal {
    id: NetId,
    name: String,
    position: Vec3,
    health: RefCell<f32>,
    pending_death: RefCell<Option<HitInfo>>,
    journal: RefCell<Vec<AnimalCall>>,
}

impl SimAnimal {
    pub fn new(id: u32, name: &str, health: f32) -> Self {
        Self {
            id: NetId::new(id),
            name: name.to_string(),
            position: Vec3::ZERO,
            health: RefCell::new(health),
            pending_death: RefCell::new(None),
            journal: RefCell::new(Vec::new()),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Death the engine ran since the last call, for the caller to report
    /// through the animal-died hook.
    pub fn take_pending_death(&self) -> Option<HitInfo> {
        self.pending_death.borrow_mut().take()
    }

    pub fn journal(&self) -> Vec<AnimalCall> {
        self.journal.borrow().clone()
    }

    pub fn death_count(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|c| matches!(c, AnimalCall::Die(_)))
            .count()
    }
}

impl NativeAnimal for SimAnimal {
    fn net_id(&self) -> NetId {
        self.id
    }

    fn prefab_name(&self) -> String {
        self.name.clone()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn health(&self) -> f32 {
        *self.health.borrow()
    }

    fn set_health(&self, health: f32) {
        *self.health.borrow_mut() = health;
        self.journal.borrow_mut().push(AnimalCall::SetHealth(health));
    }

    fn die(&self, info: &HitInfo) {
        *self.pending_death.borrow_mut() = Some(info.clone());
        self.journal.borrow_mut().push(AnimalCall::Die(info.clone()));
    }
}
