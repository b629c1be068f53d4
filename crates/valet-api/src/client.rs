//! Owner-API HTTP client.
//!
//! This module provides a client for the vehicle owner API, supporting:
//! - Vehicle enumeration and per-vehicle telemetry
//! - Remote commands
//! - Waking a sleeping vehicle and waiting for it to come online

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::command::VehicleCommand;
use crate::data::{VehicleData, VehicleSummary};
use crate::error::{ApiError, Result};

/// Environment variable for the owner-API access token.
pub const API_TOKEN_ENV: &str = "VALET_API_TOKEN";

/// Environment variable overriding the owner-API base URL.
pub const API_BASE_ENV: &str = "VALET_API_BASE";

/// Production owner-API base URL.
const DEFAULT_API_BASE: &str = "https://owner-api.teslamotors.com";

/// Poll interval while waiting for a vehicle to come online.
const WAKE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Response envelope wrapping every owner-API payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

/// Result payload of a command POST.
#[derive(Debug, Deserialize)]
struct CommandResult {
    result: bool,
    #[serde(default)]
    reason: String,
}

/// Owner-API client.
#[derive(Clone)]
pub struct OwnerApiClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl OwnerApiClient {
    /// Create a new client with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DEFAULT_API_BASE)
    }

    /// Create a new client against a custom base URL.
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            access_token: access_token.into(),
        }
    }

    /// Create a client from environment variables.
    ///
    /// Uses `VALET_API_TOKEN`, and `VALET_API_BASE` when set.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(API_TOKEN_ENV).map_err(|_| ApiError::NoToken)?;
        match std::env::var(API_BASE_ENV) {
            Ok(base) => Ok(Self::with_base_url(token, base)),
            Err(_) => Ok(Self::new(token)),
        }
    }

    /// List all vehicles on the account.
    pub async fn vehicle_list(&self) -> Result<Vec<VehicleSummary>> {
        self.get_json::<Vec<VehicleSummary>>("/api/1/vehicles").await
    }

    /// Fetch the summary of one vehicle (cheap; works while asleep).
    pub async fn vehicle(&self, id: u64) -> Result<VehicleSummary> {
        self.get_json(&format!("/api/1/vehicles/{}", id)).await
    }

    /// Fetch the full telemetry snapshot. The vehicle must be awake.
    pub async fn vehicle_data(&self, id: u64) -> Result<VehicleData> {
        self.get_json(&format!("/api/1/vehicles/{}/vehicle_data", id))
            .await
    }

    /// Ask a sleeping vehicle to wake up. Returns the (possibly still
    /// waking) summary; use [`wake_up_and_wait`](Self::wake_up_and_wait) to
    /// block until it is online.
    pub async fn wake_up(&self, id: u64) -> Result<VehicleSummary> {
        let url = format!("{}/api/1/vehicles/{}/wake_up", self.base_url, id);
        debug!(id, "Sending wake_up");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let envelope: Envelope<VehicleSummary> = Self::decode(response).await?;
        Ok(envelope.response)
    }

    /// Wake the vehicle and poll until it reports `online` or `timeout`
    /// elapses.
    pub async fn wake_up_and_wait(&self, id: u64, timeout: Duration) -> Result<VehicleSummary> {
        let summary = self.wake_up(id).await?;
        if summary.is_online() {
            return Ok(summary);
        }

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            tokio::time::sleep(WAKE_POLL_INTERVAL).await;
            if tokio::time::Instant::now() >= deadline {
                warn!(id, timeout_secs = timeout.as_secs(), "Vehicle wake timed out");
                return Err(ApiError::WakeTimeout(timeout.as_secs()));
            }

            let summary = self.vehicle(id).await?;
            trace!(id, state = %summary.state, "Wake poll");
            if summary.is_online() {
                debug!(id, "Vehicle is online");
                return Ok(summary);
            }
        }
    }

    /// Issue a remote command. The vehicle must be awake for most commands
    /// (see [`VehicleCommand::requires_wake`]).
    pub async fn command(&self, id: u64, command: &VehicleCommand) -> Result<()> {
        let url = format!(
            "{}/api/1/vehicles/{}/command/{}",
            self.base_url,
            id,
            command.endpoint()
        );
        debug!(id, endpoint = command.endpoint(), "Sending command");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&command.body())
            .send()
            .await?;

        let envelope: Envelope<CommandResult> = Self::decode(response).await?;
        if !envelope.response.result {
            return Err(ApiError::CommandRejected {
                reason: envelope.response.reason,
            });
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        trace!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let envelope: Envelope<T> = Self::decode(response).await?;
        Ok(envelope.response)
    }

    /// Map an HTTP response to a typed payload or error.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status == reqwest::StatusCode::REQUEST_TIMEOUT {
            return Err(ApiError::VehicleAsleep);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
