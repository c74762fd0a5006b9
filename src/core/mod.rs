pub mod engine;
pub mod events;
pub mod game_manager;
pub mod observer;

pub use engine::{Autopilot, DayRecord, SimulationEngine, SimulationSummary};
pub use events::{EventContext, EventManager, EventResult, ZooEvent};
pub use game_manager::{ZooManager, DEFAULT_INITIAL_FUNDS};
pub use observer::HealthMonitor;
