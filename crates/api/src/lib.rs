//! Cost API library surface, shared by the binary and integration tests

pub mod api;
pub mod config;
