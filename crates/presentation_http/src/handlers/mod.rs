//! HTTP request handlers

pub mod cache;
pub mod fable;
pub mod health;
