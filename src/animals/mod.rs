pub mod animal;
pub mod behavior;
pub mod factory;
pub mod species;

pub use animal::{Animal, CRITICAL_HEALTH_THRESHOLD};
pub use factory::{AnimalConfig, AnimalFactory, AnimalOptions};
pub use species::{Behavior, ClassTraits, Species};
