//! Shared building blocks for Valet.
//!
//! This crate holds everything the bot needs that is not the owner API or
//! Telegram itself: configuration paths, unit conversion for the status
//! readout, reverse geocoding of the vehicle position, and the append-only
//! charging-state log.

pub mod charging_log;
pub mod config;
pub mod geocode;
pub mod units;

pub use charging_log::record_charging_state;
pub use geocode::{reverse_geocode, GeocodeError, Place};
