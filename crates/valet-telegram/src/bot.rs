//! Main Telegram bot implementation.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::error::{BotError, Result};
use crate::handlers::{handle_command, Command};
use crate::state::ValetState;

/// Environment variable for the Telegram bot token.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// The Telegram bot for Valet.
pub struct ValetBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<ValetState>,
}

impl ValetBot {
    /// Create a new ValetBot instance.
    ///
    /// Requires `TELEGRAM_BOT_TOKEN` environment variable to be set.
    pub fn new(state: Arc<ValetState>) -> Result<Self> {
        let token = std::env::var(BOT_TOKEN_ENV).map_err(|_| BotError::NoToken)?;
        let bot = Bot::new(token);
        Ok(Self { bot, state })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Publish the slash-command menu to Telegram.
    ///
    /// The equivalent of command registration on other chat platforms; only
    /// needed once per deployment (or when the command surface changes).
    pub async fn register_commands(&self) -> Result<()> {
        self.bot
            .set_my_commands(Command::bot_commands())
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        info!("Registered command menu");
        Ok(())
    }

    /// Start the bot in polling mode.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        // Enumerate vehicles up front so the first command doesn't pay for
        // the list call. Failure is not fatal; /cars retries.
        match self.state.refresh_vehicles().await {
            Ok(vehicles) => {
                info!(count = vehicles.len(), "Recognized vehicles:");
                for vehicle in &vehicles {
                    info!("  - {}", vehicle.display_name);
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not list vehicles at startup");
            }
        }

        let bot = self.bot.clone();
        let state_for_commands = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Unrecognized commands (start with / but didn't parse)
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| async move {
                        if let Some(text) = msg.text() {
                            info!(cmd = %text, "Unrecognized command");
                            bot.send_message(
                                msg.chat.id,
                                format!(
                                    "Unknown command: {}\n\nUse /help to see available commands.",
                                    text.split_whitespace().next().unwrap_or(text)
                                ),
                            )
                            .await?;
                        }
                        Ok(())
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        msg.text().map(|t| !t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| async move {
                        bot.send_message(msg.chat.id, "Send /help to see what I can do.")
                            .await?;
                        Ok(())
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Construction and polling need a live Telegram API; the dispatch logic
    // is covered through the handler and state tests instead.
}
