//! Domain models for CropKeeper

mod farm;

pub use farm::*;
