//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys and touches mapped to commands)
//! - Storage (LocalStorage on web, nothing on native)

pub mod input;
pub mod storage;
