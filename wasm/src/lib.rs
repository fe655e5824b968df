//! WebAssembly module for CropKeeper
//!
//! Provides browser-side pieces of the farm selection flow:
//! - `localStorage` backed preference storage
//! - Farm input validation before a record is submitted
//! - Size conversion between units

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript glue
pub use shared::models::*;
pub use shared::storage::{KeyValueStore, StorageError};
pub use shared::types::*;
pub use shared::validation::*;

// ============================================================================
// Preference Storage
// ============================================================================

/// Key-value store over the browser's `localStorage`
///
/// The window handle is looked up on every call so the store itself stays
/// `Send + Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| {
            web_sys::console::warn_1(&format!("Failed to write {}", key).into());
            StorageError::Unavailable(format!("{:?}", e))
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

/// Remembered farm id, if any
#[wasm_bindgen]
pub fn remembered_farm_id() -> Option<String> {
    match LocalStorage.get(SELECTED_FARM_KEY) {
        Ok(value) => value.filter(|id| !id.is_empty()),
        Err(e) => {
            web_sys::console::warn_1(&format!("Could not read selection: {}", e).into());
            None
        }
    }
}

// ============================================================================
// Validation and Conversion
// ============================================================================

/// Outcome of validating a farm form
#[derive(Debug, Serialize, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Check farm attributes given as JSON
pub fn check_farm_input(input_json: &str) -> Result<ValidationReport, String> {
    let input: FarmInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid farm JSON: {}", e))?;

    Ok(match validate_farm_input(&input) {
        Ok(()) => ValidationReport {
            valid: true,
            field: None,
            message: None,
        },
        Err(e) => ValidationReport {
            valid: false,
            field: Some(e.field.to_string()),
            message: Some(e.message.to_string()),
        },
    })
}

/// Convert a decimal size string between unit names
pub fn convert_size_text(size: &str, from: &str, to: &str) -> Result<String, String> {
    let size = Decimal::from_str(size.trim()).map_err(|e| format!("Invalid size: {}", e))?;
    let from = SizeUnit::from_str(from)?;
    let to = SizeUnit::from_str(to)?;
    convert_size(size, from, to)
        .map(|converted| converted.normalize().to_string())
        .ok_or_else(|| "Size too large to convert".to_string())
}

/// Validate farm attributes, returning a JSON report
#[wasm_bindgen]
pub fn validate_farm_input_json(input_json: &str) -> Result<String, JsValue> {
    let report = check_farm_input(input_json).map_err(|e| JsValue::from_str(&e))?;
    serde_json::to_string(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a farm size between units
#[wasm_bindgen]
pub fn convert_farm_size(size: &str, from: &str, to: &str) -> Result<String, JsValue> {
    convert_size_text(size, from, to).map_err(|e| JsValue::from_str(&e))
}
