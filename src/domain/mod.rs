// Domain layer: quote models and the ports the carrier talks through.

pub mod model;
pub mod ports;
