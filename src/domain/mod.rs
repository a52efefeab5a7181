// Domain layer: estimate models and the traits the core and adapters meet at.

pub mod model;
pub mod ports;
