//! Value Objects - Immutable, identity-less domain primitives

mod cache_key;
mod style_mode;

pub use cache_key::CacheKey;
pub use style_mode::StyleMode;
