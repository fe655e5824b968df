//! CropKeeper client
//!
//! Client-side state for the CropKeeper farm manager: the farm selection
//! store, the farm directories it loads from, and the durable preference
//! stores that remember the active farm between runs.

pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod state;
pub mod storage;
pub mod store;

pub use config::ClientConfig;
pub use directory::{FarmDirectory, FixtureFarmDirectory, HttpFarmDirectory};
pub use error::{DirectoryError, DirectoryResult};
pub use state::{FarmState, LoadOutcome};
pub use storage::FileKeyValueStore;
pub use store::FarmSelectionStore;
