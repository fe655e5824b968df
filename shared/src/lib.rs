//! Shared types and models for CropKeeper
//!
//! This crate contains the farm model, its validation rules and the
//! persistent key-value capability shared between the backend, the native
//! client and the browser (via WASM).

pub mod models;
pub mod storage;
pub mod types;
pub mod validation;

pub use models::*;
pub use storage::*;
pub use types::*;
pub use validation::*;
