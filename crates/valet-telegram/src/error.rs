//! Error types for the Telegram bot.

use thiserror::Error;

/// Errors that can occur in the Telegram bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// Allow-list not provided.
    #[error("No allowed users configured. Set ALLOWED_USER_IDS environment variable.")]
    NoAllowedUsers,

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// The account has no vehicles.
    #[error("No vehicles found on this account")]
    NoVehicles,

    /// A vehicle index outside the known list was requested.
    #[error("No vehicle number {0}. Use /cars to list them.")]
    NoSuchVehicle(usize),

    /// The vehicle stayed asleep through every wake attempt.
    #[error("Vehicle did not wake up after {0} attempts")]
    WakeFailed(u32),

    /// Owner-API error.
    #[error(transparent)]
    Api(#[from] valet_api::ApiError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
