// Domain layer: records, their XML mapping and the ports (interfaces) to the outside world.

pub mod document;
pub mod model;
pub mod ports;
