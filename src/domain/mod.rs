// Domain layer: customer model, sort tokens and the ports the core calls through.

pub mod model;
pub mod ports;
