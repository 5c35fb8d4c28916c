// Adapters layer: concrete implementations of the domain ports (HTTP
// collaborators, in-process stores).

pub mod geocode;
pub mod http_zones;
pub mod memory;
