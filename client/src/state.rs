//! Observable farm selection state

use serde::Serialize;
use shared::{Farm, FarmId};

/// Snapshot of the farm selection store
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FarmState {
    /// Farms in the order the directory returned them
    pub farms: Vec<Farm>,
    pub selected_farm: Option<Farm>,
    /// True while the newest load is outstanding
    pub loading: bool,
    /// Message of the last failed load, cleared when a new load starts
    pub error: Option<String>,
    /// Set once the first load has resolved
    pub is_initialized: bool,
}

impl FarmState {
    pub fn find(&self, id: &FarmId) -> Option<&Farm> {
        self.farms.iter().find(|farm| &farm.id == id)
    }

    pub fn selected_id(&self) -> Option<&FarmId> {
        self.selected_farm.as_ref().map(|farm| &farm.id)
    }
}

/// How a call to `load_farms` resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched list replaced the known farms
    Loaded { count: usize },
    /// The fetch failed; the message is also in `FarmState::error`
    Failed { message: String },
    /// A newer load or a reset superseded this one; nothing was applied
    Discarded,
}
