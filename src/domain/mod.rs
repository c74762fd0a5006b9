// Domain layer: snapshot models and ports shared by animals, zoo, core and ui.

pub mod model;
pub mod ports;
