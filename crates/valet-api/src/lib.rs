//! Owner-API client for Valet.
//!
//! This crate wraps the vehicle manufacturer's owner HTTP API: listing
//! vehicles, waking them from sleep, reading telemetry, and issuing remote
//! commands (locks, climate, Sentry Mode, horn/lights, trunks, windows).
//!
//! Authentication uses a pre-issued bearer token; the OAuth flow that mints
//! one is out of scope. Set `VALET_API_TOKEN` and optionally
//! `VALET_API_BASE` to point the client at a different deployment (used by
//! tests).
//!
//! # Example
//!
//! ```no_run
//! use valet_api::{OwnerApiClient, VehicleCommand};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), valet_api::ApiError> {
//!     let client = OwnerApiClient::from_env()?;
//!     let vehicles = client.vehicle_list().await?;
//!     let car = &vehicles[0];
//!
//!     client
//!         .wake_up_and_wait(car.id, std::time::Duration::from_secs(120))
//!         .await?;
//!     client.command(car.id, &VehicleCommand::FlashLights).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod command;
pub mod compositor;
pub mod data;
pub mod error;

pub use client::{OwnerApiClient, API_BASE_ENV, API_TOKEN_ENV};
pub use command::{TrunkWhich, VehicleCommand, WindowCommand};
pub use compositor::{compositor_url, model_code_from_vin};
pub use data::{
    ChargeState, ChargingState, ClimateState, DriveState, ShiftState, SoftwareUpdate, VehicleData,
    VehicleState, VehicleSummary,
};
pub use error::{ApiError, Result};
