//! Telegram bot interface for Valet.
//!
//! This crate provides a Telegram bot that relays remote commands to a
//! personal electric vehicle through the owner API: locks, climate, Sentry
//! Mode, horn and lights, trunks, window venting, and a full status readout.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//! - `VALET_API_TOKEN`: Pre-issued owner-API bearer token
//! - `ALLOWED_USER_IDS`: Comma-separated Telegram user ids allowed to issue
//!   commands
//!
//! Optional:
//! - `VALET_API_BASE`: Override the owner-API base URL
//! - `CUSTOM_OPTION_CODES`: Option codes for the readout render when
//!   telemetry reports none
//!
//! # Example
//!
//! ```no_run
//! use valet_core::config;
//! use valet_telegram::{ValetBot, ValetState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = ValetState::from_env(config::charging_log_file())?;
//!     let bot = ValetBot::new(state)?;
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/start`, `/help` - onboarding and command list
//! - `/lock`, `/unlock` - door locks
//! - `/climate <on|off>` - climate conditioning
//! - `/sentry <on|off>` - Sentry Mode
//! - `/honk`, `/flash` - horn and headlights
//! - `/trunk <front|rear>` - trunk actuation
//! - `/vent` - vent or close the windows
//! - `/boombox` - the novelty sound
//! - `/wake` - wake the car from sleep
//! - `/cars`, `/car <n>` - list and select vehicles
//! - `/info` - full status readout

pub mod bot;
pub mod error;
pub mod format;
pub mod handlers;
pub mod state;

pub use bot::ValetBot;
pub use error::{BotError, Result};
pub use handlers::Command;
pub use state::ValetState;
