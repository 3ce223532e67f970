//! Persistence layer using sqlx with SQLite

mod async_connection;
mod error;
mod sqlite_fable_cache;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use error::map_sqlx_error;
pub use sqlite_fable_cache::SqliteFableCache;
