//! Fable cache backends
//!
//! - `postgrest`: hosted table behind a PostgREST (Supabase) endpoint
//! - `unavailable`: stand-in when no backend is configured
//!
//! The SQLite backend lives in [`crate::persistence`].

mod factory;
mod postgrest_fable_cache;
mod unavailable_fable_cache;

pub use factory::build_fable_cache;
pub use postgrest_fable_cache::PostgrestFableCache;
pub use unavailable_fable_cache::UnavailableFableCache;
