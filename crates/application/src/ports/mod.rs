//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod fable_cache_port;
mod remote_generator_port;

#[cfg(test)]
pub use fable_cache_port::MockFableCachePort;
pub use fable_cache_port::{CacheStats, FableCachePort};
#[cfg(test)]
pub use remote_generator_port::MockRemoteGeneratorPort;
pub use remote_generator_port::RemoteGeneratorPort;
