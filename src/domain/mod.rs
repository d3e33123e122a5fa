// Domain layer: models and ports. Adapters live under src/adapters and src/config.

pub mod model;
pub mod ports;
