//! Business logic services for the CropKeeper record API

pub mod farm;

pub use farm::FarmService;
