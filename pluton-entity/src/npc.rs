use pluton_engine::NativeAnimal;
use pluton_types::{DamageType, HitInfo, NetId, Vec3};
use std::fmt;

/// Non-caching view over a live [`NativeAnimal`].
#[derive(Clone, Copy)]
pub struct Npc<'a> {
    native: &'a dyn NativeAnimal,
}

impl<'a> Npc<'a> {
    pub fn new(native: &'a dyn NativeAnimal) -> Self {
        Self { native }
    }

    pub fn native(&self) -> &'a dyn NativeAnimal {
        self.native
    }

    pub fn id(&self) -> NetId {
        self.native.net_id()
    }

    pub fn name(&self) -> String {
        self.native.prefab_name()
    }

    pub fn health(&self) -> f32 {
        self.native.health()
    }

    pub fn set_health(&self, health: f32) {
        self.native.set_health(health);
    }

    pub fn location(&self) -> Vec3 {
        self.native.position()
    }

    pub fn kill(&self) {
        self.native.die(&HitInfo::new(0.0, DamageType::Generic));
    }
}

impl PartialEq for Npc<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Npc<'_> {}

impl fmt::Debug for Npc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Npc")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}
