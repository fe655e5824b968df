//! HTTP handlers for the CropKeeper record API

pub mod farm;
pub mod health;

pub use farm::*;
pub use health::*;
