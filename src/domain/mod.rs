// Domain layer: models, ports and the default aggregation services.

pub mod model;
pub mod ports;
pub mod services;
