//! Adapters implementing application ports

mod remote_fable_adapter;

pub use remote_fable_adapter::RemoteFableAdapter;
