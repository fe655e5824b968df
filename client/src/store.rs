//! Farm selection store
//!
//! Owns the list of known farms and the active farm, and keeps the active
//! farm consistent with the farm directory and with the persisted
//! preference under [`SELECTED_FARM_KEY`].
//!
//! State lives in a `tokio::sync::watch` channel: every mutation is applied
//! under the channel lock, so readers never see a half-applied load. Writes
//! to the preference store happen under the same lock, which keeps the
//! persisted id in step with `selected_farm` when callers race.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shared::{Farm, FarmId, KeyValueStore, SELECTED_FARM_KEY};
use tokio::sync::watch;

use crate::directory::FarmDirectory;
use crate::state::{FarmState, LoadOutcome};

/// Process-wide farm selection state
pub struct FarmSelectionStore {
    directory: Arc<dyn FarmDirectory>,
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<FarmState>,
    /// Number of the newest load; older resolutions are discarded
    latest_request: AtomicU64,
}

impl FarmSelectionStore {
    pub fn new(directory: Arc<dyn FarmDirectory>, storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(FarmState::default());
        Self {
            directory,
            storage,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    /// Directory used for farm CRUD; reload with [`load_farms`](Self::load_farms) afterwards
    pub fn directory(&self) -> &Arc<dyn FarmDirectory> {
        &self.directory
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FarmState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FarmState> {
        self.state.subscribe()
    }

    /// Fetch farms from the directory and reconcile the selection.
    ///
    /// Never fails: a directory error is recorded in `FarmState::error`.
    pub async fn load_farms(&self) -> LoadOutcome {
        let mut request = 0;
        self.state.send_modify(|state| {
            request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
        });
        tracing::debug!(request, "Loading farms");

        let result = self.directory.list().await;

        let mut outcome = LoadOutcome::Discarded;
        self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != request {
                return false;
            }

            state.loading = false;
            match result {
                Ok(farms) => {
                    outcome = LoadOutcome::Loaded { count: farms.len() };
                    state.farms = farms;
                    state.error = None;
                    self.auto_select(state);
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!("Failed to load farms: {}", message);
                    outcome = LoadOutcome::Failed {
                        message: message.clone(),
                    };
                    state.error = Some(message);
                }
            }
            state.is_initialized = true;
            true
        });

        if outcome == LoadOutcome::Discarded {
            tracing::debug!(request, "Discarding superseded farm load");
        }
        outcome
    }

    /// Make `farm` the active farm and remember it, or forget the choice on `None`.
    ///
    /// The farm is not checked against the known farms.
    pub fn set_selected_farm(&self, farm: Option<Farm>) {
        let id = farm.as_ref().map(|farm| farm.id.clone());
        self.state.send_modify(|state| {
            self.persist_selection(id.as_ref());
            state.selected_farm = farm;
        });

        match id {
            Some(id) => tracing::info!("Selected farm {}", id),
            None => tracing::info!("Cleared farm selection"),
        }
    }

    /// Run the auto-selection rule if farms are known but none is selected
    pub fn initialize_farm_selection(&self) {
        self.state.send_modify(|state| {
            self.auto_select(state);
            state.is_initialized = true;
        });
    }

    /// Reset to the initial state and forget the persisted choice.
    ///
    /// Loads still in flight are discarded when they resolve.
    pub fn clear_farm_state(&self) {
        self.state.send_modify(|state| {
            self.latest_request.fetch_add(1, Ordering::SeqCst);
            *state = FarmState::default();

            if let Err(e) = self.storage.remove(SELECTED_FARM_KEY) {
                tracing::warn!(error = %e, "Failed to remove persisted farm selection");
            }
        });
        tracing::info!("Farm state cleared");
    }

    /// Select the persisted farm if it is still known, else the first farm.
    ///
    /// No-op when a farm is already selected or there are no farms.
    fn auto_select(&self, state: &mut FarmState) {
        if state.selected_farm.is_some() {
            return;
        }
        let Some(first) = state.farms.first().cloned() else {
            return;
        };

        let remembered = self
            .read_persisted_selection()
            .and_then(|id| state.find(&id).cloned());

        match remembered {
            Some(farm) => {
                tracing::debug!("Restored selected farm {}", farm.id);
                state.selected_farm = Some(farm);
            }
            None => {
                tracing::debug!("Defaulting selection to farm {}", first.id);
                self.persist_selection(Some(&first.id));
                state.selected_farm = Some(first);
            }
        }
    }

    fn read_persisted_selection(&self) -> Option<FarmId> {
        match self.storage.get(SELECTED_FARM_KEY) {
            Ok(Some(id)) if !id.is_empty() => Some(FarmId::new(id)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted farm selection");
                None
            }
        }
    }

    fn persist_selection(&self, id: Option<&FarmId>) {
        let result = match id {
            Some(id) => self.storage.set(SELECTED_FARM_KEY, id.as_str()),
            None => self.storage.remove(SELECTED_FARM_KEY),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist farm selection");
        }
    }
}
