//! Background tasks for the HTTP presentation layer

mod cache_cleanup;

pub use cache_cleanup::spawn_cache_cleanup_task;
