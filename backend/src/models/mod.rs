//! Database models for the CropKeeper record API
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
