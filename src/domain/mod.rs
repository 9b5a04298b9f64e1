// Domain layer: rename rules, plans, run records and the ports the engine depends on.

pub mod model;
pub mod ports;
