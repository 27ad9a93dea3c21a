//! CLI library components for OG1 vocabulary validation.

pub mod logging;
pub mod pipeline;
pub mod storage;
pub mod types;
