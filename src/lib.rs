pub mod animals;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;
pub mod zoo;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ScenarioConfig;

pub use animals::{Animal, AnimalFactory, Behavior};
pub use core::{Autopilot, SimulationEngine, ZooManager};
pub use utils::error::{Result, ZooError};
pub use zoo::{Enclosure, Zoo};
