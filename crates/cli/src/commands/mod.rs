//! CLI command implementations

pub mod analysis;
pub mod records;
pub mod report;
pub mod upload;
