//! Shared state for the Telegram bot.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use valet_api::{OwnerApiClient, VehicleCommand, VehicleData, VehicleSummary};
use valet_core::geocode::{reverse_geocode, Place};

use crate::error::{BotError, Result};

/// Environment variable holding the comma-separated Telegram user allow-list.
pub const ALLOWED_USERS_ENV: &str = "ALLOWED_USER_IDS";

/// How many times a wake is attempted before giving up.
const WAKE_ATTEMPTS: u32 = 3;

/// How long each wake attempt waits for the vehicle to come online.
const WAKE_TIMEOUT: Duration = Duration::from_secs(120);

/// Parse the allow-list env value. Tolerates spaces and empty entries.
fn parse_allowed_users(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Shared state for the Telegram bot, accessible across all handlers.
pub struct ValetState {
    /// Owner-API client.
    api: OwnerApiClient,
    /// Plain HTTP client for reverse geocoding.
    http: reqwest::Client,
    /// Cached vehicle list, refreshed at startup and via /cars.
    vehicles: RwLock<Vec<VehicleSummary>>,
    /// Index into `vehicles` of the active vehicle.
    selected: RwLock<usize>,
    /// Telegram user ids allowed to issue commands.
    allowed_users: HashSet<u64>,
    /// Charging-state log destination.
    charging_log: PathBuf,
}

impl ValetState {
    /// Build the shared state from environment variables.
    ///
    /// Requires `VALET_API_TOKEN` and `ALLOWED_USER_IDS`.
    pub fn from_env(charging_log: PathBuf) -> Result<Arc<Self>> {
        let api = OwnerApiClient::from_env()?;

        let raw = std::env::var(ALLOWED_USERS_ENV).map_err(|_| BotError::NoAllowedUsers)?;
        let allowed_users = parse_allowed_users(&raw);
        if allowed_users.is_empty() {
            return Err(BotError::NoAllowedUsers);
        }
        info!(count = allowed_users.len(), "Loaded user allow-list");

        Ok(Arc::new(Self {
            api,
            http: reqwest::Client::new(),
            vehicles: RwLock::new(Vec::new()),
            selected: RwLock::new(0),
            allowed_users,
            charging_log,
        }))
    }

    /// State with an explicit client and allow-list (for tests).
    pub fn with_client(
        api: OwnerApiClient,
        allowed_users: HashSet<u64>,
        charging_log: PathBuf,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            http: reqwest::Client::new(),
            vehicles: RwLock::new(Vec::new()),
            selected: RwLock::new(0),
            allowed_users,
            charging_log,
        })
    }

    /// Whether this Telegram user may issue commands.
    pub fn is_authorized(&self, user_id: u64) -> bool {
        self.allowed_users.contains(&user_id)
    }

    /// Re-fetch the vehicle list from the API and cache it.
    ///
    /// Clamps the selected index if the list shrank.
    pub async fn refresh_vehicles(&self) -> Result<Vec<VehicleSummary>> {
        let list = self.api.vehicle_list().await?;
        info!(count = list.len(), "Refreshed vehicle list");

        // Lock order everywhere is vehicles, then selected.
        let mut vehicles = self.vehicles.write().await;
        let mut selected = self.selected.write().await;
        if *selected >= list.len() {
            *selected = 0;
        }
        *vehicles = list.clone();
        Ok(list)
    }

    /// The cached vehicle list.
    pub async fn vehicles(&self) -> Vec<VehicleSummary> {
        self.vehicles.read().await.clone()
    }

    /// Index of the active vehicle.
    pub async fn selected_index(&self) -> usize {
        *self.selected.read().await
    }

    /// The active vehicle's cached summary.
    pub async fn selected_vehicle(&self) -> Result<VehicleSummary> {
        let vehicles = self.vehicles.read().await;
        let index = *self.selected.read().await;
        vehicles.get(index).cloned().ok_or(BotError::NoVehicles)
    }

    /// Select the active vehicle by zero-based index.
    pub async fn select_vehicle(&self, index: usize) -> Result<VehicleSummary> {
        let vehicles = self.vehicles.read().await;
        let vehicle = vehicles
            .get(index)
            .cloned()
            .ok_or(BotError::NoSuchVehicle(index + 1))?;
        *self.selected.write().await = index;
        info!(index, name = %vehicle.display_name, "Selected vehicle");
        Ok(vehicle)
    }

    /// Wake the active vehicle, retrying the full wake cycle up to
    /// [`WAKE_ATTEMPTS`] times.
    pub async fn wake_selected(&self) -> Result<VehicleSummary> {
        let vehicle = self.selected_vehicle().await?;

        for attempt in 1..=WAKE_ATTEMPTS {
            match self.api.wake_up_and_wait(vehicle.id, WAKE_TIMEOUT).await {
                Ok(summary) => return Ok(summary),
                Err(e) => {
                    debug!(attempt, error = %e, "Failed to wake up vehicle. Retrying...");
                }
            }
        }

        warn!(id = vehicle.id, attempts = WAKE_ATTEMPTS, "Vehicle never came online");
        Err(BotError::WakeFailed(WAKE_ATTEMPTS))
    }

    /// Wake the active vehicle and fetch its full telemetry snapshot.
    ///
    /// Also appends the observed charging state to the charging log; a log
    /// write failure is reported but does not fail the readout.
    pub async fn fetch_vehicle_data(&self) -> Result<VehicleData> {
        let vehicle = self.wake_selected().await?;
        let data = self.api.vehicle_data(vehicle.id).await?;

        if let Err(e) = valet_core::record_charging_state(
            &self.charging_log,
            data.charge_state.charging_state.as_str(),
        ) {
            warn!(error = %e, "Failed to record charging state");
        }

        Ok(data)
    }

    /// Issue a remote command against the active vehicle, waking it first
    /// when the command needs an awake car.
    pub async fn execute(&self, command: &VehicleCommand) -> Result<()> {
        let vehicle = if command.requires_wake() {
            self.wake_selected().await?
        } else {
            self.selected_vehicle().await?
        };

        self.api.command(vehicle.id, command).await?;
        info!(id = vehicle.id, endpoint = command.endpoint(), "Command executed");
        Ok(())
    }

    /// Resolve coordinates to a place for the readout. Geocoding failures
    /// degrade to `None` rather than failing the readout.
    pub async fn locate(&self, latitude: f64, longitude: f64) -> Option<Place> {
        match reverse_geocode(&self.http, latitude, longitude).await {
            Ok(place) => Some(place),
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                None
            }
        }
    }
}
