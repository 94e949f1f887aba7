// Domain layer: core models and ports (interfaces). No dependencies on
// adapters or config; serde only where the models cross a boundary.

pub mod model;
pub mod ports;
