//! Domain entities - Objects with identity and lifecycle

mod cache_entry;
mod fable_request;
mod generated_fable;

pub use cache_entry::CacheEntry;
pub use fable_request::FableRequest;
pub use generated_fable::{FableSource, GeneratedFable};
