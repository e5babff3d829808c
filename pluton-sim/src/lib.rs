//! In-memory engine double.
//!
//! Every type here implements one of the `pluton-engine` traits on plain
//! `RefCell` state and records each engine-side effect in a journal, so
//! tests and the replay harness can assert on exactly what the bridge did
//! and in which order.

mod animal;
mod player;
mod resource;
mod world;

pub use animal::{AnimalCall, SimAnimal};
pub use player::{PlayerCall, SimPlayer};
pub use resource::{ResourceCall, SimResource};
pub use world::{SimConsole, SimConsoleArg, SimEntity, SimItem, SimWorld};
