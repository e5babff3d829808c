//! Damage context passed along with hurt and death callbacks.

use crate::{NetId, PlayerId, Vec3};
use serde::{Deserialize, Serialize};

/// Kind of damage as reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Generic,
    Hunger,
    Thirst,
    Cold,
    Drowned,
    Heat,
    Bleeding,
    Poison,
    Suicide,
    Bullet,
    Slash,
    BluntTrauma,
    Fall,
    Radiation,
    Bite,
    Stab,
    Explosion,
}

/// The entity that caused a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Initiator {
    Player(PlayerId),
    Entity(NetId),
}

/// Everything the engine knows about a single hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitInfo {
    pub damage_amount: f32,
    pub damage_type: DamageType,
    #[serde(default)]
    pub initiator: Option<Initiator>,
    /// World position the hit originated from.
    #[serde(default)]
    pub point_start: Vec3,
    /// Multiplier applied to damage when the target is a gatherable resource.
    #[serde(default = "default_gather_proficiency")]
    pub resource_gather_proficiency: f32,
}

fn default_gather_proficiency() -> f32 {
    1.0
}

impl HitInfo {
    #[must_use]
    pub fn new(damage_amount: f32, damage_type: DamageType) -> Self {
        Self {
            damage_amount,
            damage_type,
            initiator: None,
            point_start: Vec3::ZERO,
            resource_gather_proficiency: default_gather_proficiency(),
        }
    }

    /// Minimal hit context used when the engine did not supply one:
    /// no damage, the last known damage type, and the victim as initiator.
    #[must_use]
    pub fn fallback(damage_type: DamageType, initiator: Initiator) -> Self {
        Self::new(0.0, damage_type).with_initiator(initiator)
    }

    #[must_use]
    pub fn with_initiator(mut self, initiator: Initiator) -> Self {
        self.initiator = Some(initiator);
        self
    }

    #[must_use]
    pub fn with_point_start(mut self, point_start: Vec3) -> Self {
        self.point_start = point_start;
        self
    }

    #[must_use]
    pub fn with_gather_proficiency(mut self, proficiency: f32) -> Self {
        self.resource_gather_proficiency = proficiency;
        self
    }

    /// Damage dealt to a gatherable resource by this hit.
    #[must_use]
    pub fn gather_damage(&self) -> f32 {
        self.damage_amount * self.resource_gather_proficiency
    }
}

impl Default for HitInfo {
    fn default() -> Self {
        Self::new(0.0, DamageType::Generic)
    }
}
