// Domain layer: core models and ports (interfaces) shared by the stores and adapters.

pub mod model;
pub mod ports;
