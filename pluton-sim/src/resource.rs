use pluton_engine::NativeResource;
use pluton_types::{NetId, Vec3};
use std::cell::RefCell;

/// Engine-side effect recorded by [`SimResource`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceCall {
    SetHealth(f32),
    Kill,
    UpdateNetworkStage,
}

/// Scriptable [`NativeResource`].
#[derive(Debug)]
pub struct SimResource {
    id: NetId,
    name: String,
    position: Vec3,
    health: RefCell<f32>,
    journal: RefCell<Vec<ResourceCall>>,
}

impl SimResource {
    pub fn new(id: u32, name: &str, health: f32) -> Self {
        Self {
            id: NetId::new(id),
            name: name.to_string(),
            position: Vec3::ZERO,
            health: RefCell::new(health),
            journal: RefCell::new(Vec::new()),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn journal(&self) -> Vec<ResourceCall> {
        self.journal.borrow().clone()
    }

    pub fn kill_count(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|c| **c == ResourceCall::Kill)
            .count()
    }
}

impl NativeResource for SimResource {
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
        self.journal.borrow_mut().push(ResourceCall::SetHealth(health));
    }

    fn kill(&self) {
        self.journal.borrow_mut().push(ResourceCall::Kill);
    }

    fn update_network_stage(&self) {
        self.journal.borrow_mut().push(ResourceCall::UpdateNetworkStage);
    }
}
