pub mod assets;
pub mod engine;
pub mod grid;
pub mod names;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod web;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, StepOutcome};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
