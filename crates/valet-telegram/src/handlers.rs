//! Command handlers for the Telegram bot.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};
use valet_api::{compositor_url, model_code_from_vin, TrunkWhich, VehicleCommand, WindowCommand};

use crate::format;
use crate::state::ValetState;

/// Environment variable supplying option codes for vehicles whose telemetry
/// no longer reports any (the field is deprecated server-side).
pub const CUSTOM_OPTION_CODES_ENV: &str = "CUSTOM_OPTION_CODES";

/// Image size requested from the compositor.
const COMPOSITOR_SIZE: u32 = 1024;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and get help")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Lock the car")]
    Lock,

    #[command(description = "Unlock the car")]
    Unlock,

    #[command(description = "Wake the car from sleep")]
    Wake,

    #[command(description = "Climate control: /climate <on|off>")]
    Climate(String),

    #[command(description = "Sentry Mode: /sentry <on|off>")]
    Sentry(String),

    #[command(description = "Honk the horn")]
    Honk,

    #[command(description = "Flash the headlights")]
    Flash,

    #[command(description = "Open or close the windows slightly")]
    Vent,

    #[command(description = "Actuate a trunk: /trunk <front|rear>")]
    Trunk(String),

    #[command(description = "Play the boombox sound")]
    Boombox,

    #[command(description = "List known vehicles")]
    Cars,

    #[command(description = "Select the active vehicle: /car <number>")]
    Car(String),

    #[command(description = "Show a full status readout")]
    Info,
}

/// Parse an on/off argument.
fn parse_on_off(arg: &str) -> Option<bool> {
    match arg.trim().to_lowercase().as_str() {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// Parse a trunk choice.
fn parse_trunk(arg: &str) -> Option<TrunkWhich> {
    match arg.trim().to_lowercase().as_str() {
        "front" | "frunk" => Some(TrunkWhich::Front),
        "rear" | "trunk" => Some(TrunkWhich::Rear),
        _ => None,
    }
}

/// The active vehicle's display name, HTML-escaped, for reply texts.
async fn vehicle_name(state: &ValetState) -> String {
    state
        .selected_vehicle()
        .await
        .map(|v| format::html_escape(&v.display_name))
        .unwrap_or_else(|_| "your car".to_string())
}

/// Run a remote command behind a progress message that is edited in place
/// with the outcome.
async fn run_command(
    bot: Bot,
    msg: Message,
    state: Arc<ValetState>,
    command: VehicleCommand,
    success: String,
) -> ResponseResult<()> {
    let progress_text = if command.requires_wake() {
        "⏳ Waking up the car…"
    } else {
        "⏳ Working…"
    };
    let progress = bot.send_message(msg.chat.id, progress_text).await?;

    match state.execute(&command).await {
        Ok(()) => {
            bot.edit_message_text(msg.chat.id, progress.id, success)
                .parse_mode(ParseMode::Html)
                .await?;
            info!(chat_id = %msg.chat.id, endpoint = command.endpoint(), "Command completed");
        }
        Err(e) => {
            bot.edit_message_text(msg.chat.id, progress.id, format!("❌ {}", e))
                .await?;
            error!(chat_id = %msg.chat.id, endpoint = command.endpoint(), error = %e, "Command failed");
        }
    }

    Ok(())
}

/// Handle the /start command.
pub async fn handle_start(bot: Bot, msg: Message) -> ResponseResult<()> {
    let welcome = "Welcome to Valet! 🚘\n\n\
        I relay remote commands to your car.\n\n\
        <b>Getting started:</b>\n\
        1. Use /cars to list your vehicles\n\
        2. Use /car &lt;number&gt; to pick one\n\
        3. Use /info for a full status readout\n\n\
        Type /help for all commands.";

    bot.send_message(msg.chat.id, welcome)
        .parse_mode(ParseMode::Html)
        .await?;

    info!(chat_id = %msg.chat.id, user = ?msg.from.as_ref().map(|u| &u.username), "User started bot");
    Ok(())
}

/// Handle the /help command.
pub async fn handle_help(bot: Bot, msg: Message) -> ResponseResult<()> {
    let help_text = Command::descriptions().to_string();
    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}

/// Handle the /lock command.
pub async fn handle_lock(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    let name = vehicle_name(&state).await;
    run_command(
        bot,
        msg,
        state,
        VehicleCommand::Lock,
        format!("🔐 <b>{}</b> is now locked", name),
    )
    .await
}

/// Handle the /unlock command.
pub async fn handle_unlock(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    let name = vehicle_name(&state).await;
    run_command(
        bot,
        msg,
        state,
        VehicleCommand::Unlock,
        format!("🔓 <b>{}</b> is now unlocked", name),
    )
    .await
}

/// Handle the /climate command.
pub async fn handle_climate(
    bot: Bot,
    msg: Message,
    state: Arc<ValetState>,
    arg: String,
) -> ResponseResult<()> {
    match parse_on_off(&arg) {
        Some(true) => {
            run_command(
                bot,
                msg,
                state,
                VehicleCommand::ClimateOn,
                "🌡️ <b>Starting climate</b>".to_string(),
            )
            .await
        }
        Some(false) => {
            run_command(
                bot,
                msg,
                state,
                VehicleCommand::ClimateOff,
                "🌡️ <b>Stopping climate</b>".to_string(),
            )
            .await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                "Usage: <code>/climate on</code> or <code>/climate off</code>",
            )
            .parse_mode(ParseMode::Html)
            .await?;
            Ok(())
        }
    }
}

/// Handle the /sentry command.
pub async fn handle_sentry(
    bot: Bot,
    msg: Message,
    state: Arc<ValetState>,
    arg: String,
) -> ResponseResult<()> {
    match parse_on_off(&arg) {
        Some(on) => {
            let success = if on {
                "🔴 Sentry Mode <b>activated</b>".to_string()
            } else {
                "⭕ Sentry Mode <b>deactivated</b>".to_string()
            };
            run_command(bot, msg, state, VehicleCommand::SetSentryMode { on }, success).await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                "Usage: <code>/sentry on</code> or <code>/sentry off</code>",
            )
            .parse_mode(ParseMode::Html)
            .await?;
            Ok(())
        }
    }
}

/// Handle the /honk command.
pub async fn handle_honk(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    run_command(
        bot,
        msg,
        state,
        VehicleCommand::HonkHorn,
        "📢 <b>Honking</b> horn".to_string(),
    )
    .await
}

/// Handle the /flash command.
pub async fn handle_flash(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    run_command(
        bot,
        msg,
        state,
        VehicleCommand::FlashLights,
        "🚦 Flashed headlights".to_string(),
    )
    .await
}

/// Handle the /boombox command.
pub async fn handle_boombox(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    run_command(
        bot,
        msg,
        state,
        VehicleCommand::RemoteBoombox,
        "💨 <b>Boombox</b> played".to_string(),
    )
    .await
}

/// Handle the /trunk command.
pub async fn handle_trunk(
    bot: Bot,
    msg: Message,
    state: Arc<ValetState>,
    arg: String,
) -> ResponseResult<()> {
    match parse_trunk(&arg) {
        Some(which) => {
            let success = match which {
                TrunkWhich::Front => "🚪 Actuating <b>front trunk</b>".to_string(),
                TrunkWhich::Rear => "🚪 Actuating <b>rear trunk</b>".to_string(),
            };
            run_command(bot, msg, state, VehicleCommand::ActuateTrunk { which }, success).await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                "Usage: <code>/trunk front</code> or <code>/trunk rear</code>",
            )
            .parse_mode(ParseMode::Html)
            .await?;
            Ok(())
        }
    }
}

/// Handle the /vent command.
///
/// Toggles off telemetry: vents when the windows are closed, closes them
/// when any is open.
pub async fn handle_vent(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    let progress = bot
        .send_message(msg.chat.id, "⏳ Waking up the car…")
        .await?;

    let data = match state.fetch_vehicle_data().await {
        Ok(data) => data,
        Err(e) => {
            bot.edit_message_text(msg.chat.id, progress.id, format!("❌ {}", e))
                .await?;
            error!(chat_id = %msg.chat.id, error = %e, "Vent toggle failed to read window state");
            return Ok(());
        }
    };

    let close = data.vehicle_state.fd_window != 0;
    let command = VehicleCommand::WindowControl {
        command: if close {
            WindowCommand::Close
        } else {
            WindowCommand::Vent
        },
    };

    match state.execute(&command).await {
        Ok(()) => {
            let text = if close {
                "🪟 <b>Closing windows</b>"
            } else {
                "🪟 <b>Ventilating</b> (opening windows)"
            };
            bot.edit_message_text(msg.chat.id, progress.id, text)
                .parse_mode(ParseMode::Html)
                .await?;
            info!(chat_id = %msg.chat.id, close, "Vent toggle completed");
        }
        Err(e) => {
            bot.edit_message_text(msg.chat.id, progress.id, format!("❌ {}", e))
                .await?;
            error!(chat_id = %msg.chat.id, error = %e, "Vent toggle failed");
        }
    }

    Ok(())
}

/// Handle the /wake command.
pub async fn handle_wake(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    let progress = bot
        .send_message(msg.chat.id, "⏳ Waking up the car…")
        .await?;

    match state.wake_selected().await {
        Ok(vehicle) => {
            bot.edit_message_text(
                msg.chat.id,
                progress.id,
                format!(
                    "🚗 Your car <b>{}</b> is now <b>awake</b>",
                    format::html_escape(&vehicle.display_name)
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
            info!(chat_id = %msg.chat.id, id = vehicle.id, "Vehicle woke up");
        }
        Err(e) => {
            bot.edit_message_text(msg.chat.id, progress.id, format!("❌ {}", e))
                .await?;
            error!(chat_id = %msg.chat.id, error = %e, "Wake failed");
        }
    }

    Ok(())
}

/// Handle the /cars command.
pub async fn handle_cars(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    let vehicles = match state.refresh_vehicles().await {
        Ok(vehicles) => vehicles,
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ Failed to list vehicles: {}", e))
                .await?;
            error!(chat_id = %msg.chat.id, error = %e, "Vehicle list failed");
            return Ok(());
        }
    };

    if vehicles.is_empty() {
        bot.send_message(msg.chat.id, "No vehicles found on this account.")
            .await?;
        return Ok(());
    }

    let selected = state.selected_index().await;
    let mut text = String::from("<b>🚘 Vehicles:</b>\n\n");
    for (i, vehicle) in vehicles.iter().enumerate() {
        let marker = if i == selected { "✅" } else { "🚗" };
        text.push_str(&format!(
            "{} {}. <b>{}</b> <i>({})</i>\n",
            marker,
            i + 1,
            format::html_escape(&vehicle.display_name),
            vehicle.state
        ));
    }
    text.push_str("\nUse <code>/car &lt;number&gt;</code> to switch");

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

/// Handle the /car command - select the active vehicle.
pub async fn handle_car(
    bot: Bot,
    msg: Message,
    state: Arc<ValetState>,
    arg: String,
) -> ResponseResult<()> {
    let Ok(number) = arg.trim().parse::<usize>() else {
        bot.send_message(
            msg.chat.id,
            "Usage: <code>/car &lt;number&gt;</code>\n\nUse /cars to list your vehicles.",
        )
        .parse_mode(ParseMode::Html)
        .await?;
        return Ok(());
    };

    if number == 0 {
        bot.send_message(msg.chat.id, "Vehicle numbers start at 1. Use /cars to list them.")
            .await?;
        return Ok(());
    }

    match state.select_vehicle(number - 1).await {
        Ok(vehicle) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "✅ Active vehicle is now <b>{}</b>",
                    format::html_escape(&vehicle.display_name)
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
            info!(chat_id = %msg.chat.id, number, "User switched vehicle");
        }
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ {}", e)).await?;
        }
    }

    Ok(())
}

/// Handle the /info command - the full status readout.
pub async fn handle_info(bot: Bot, msg: Message, state: Arc<ValetState>) -> ResponseResult<()> {
    let progress = bot
        .send_message(msg.chat.id, "⏳ Waking up the car…")
        .await?;

    let data = match state.fetch_vehicle_data().await {
        Ok(data) => data,
        Err(e) => {
            bot.edit_message_text(msg.chat.id, progress.id, format!("❌ {}", e))
                .await?;
            error!(chat_id = %msg.chat.id, error = %e, "Info readout failed");
            return Ok(());
        }
    };

    let place = state
        .locate(data.drive_state.latitude, data.drive_state.longitude)
        .await;

    // Vehicle render, when option codes are known
    let options = data
        .option_codes
        .clone()
        .filter(|codes| !codes.is_empty())
        .or_else(|| std::env::var(CUSTOM_OPTION_CODES_ENV).ok());
    if let Some(options) = options {
        if let Some(model) = model_code_from_vin(&data.vin) {
            let image = compositor_url(model, &options, COMPOSITOR_SIZE);
            match url::Url::parse(&image) {
                Ok(image) => {
                    if let Err(e) = bot.send_photo(msg.chat.id, InputFile::url(image)).await {
                        warn!(chat_id = %msg.chat.id, error = %e, "Failed to send vehicle render");
                    }
                }
                Err(e) => warn!(error = %e, "Compositor URL did not parse"),
            }
        }
    }

    bot.edit_message_text(msg.chat.id, progress.id, format::render_info(&data, place.as_ref()))
        .parse_mode(ParseMode::Html)
        .await?;

    info!(chat_id = %msg.chat.id, id = data.id, "Info readout sent");
    Ok(())
}

/// Dispatch commands to appropriate handlers.
///
/// Everything except /start and /help is gated on the user allow-list.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<ValetState>,
) -> ResponseResult<()> {
    if !matches!(cmd, Command::Start | Command::Help) {
        let authorized = msg
            .from
            .as_ref()
            .is_some_and(|u| state.is_authorized(u.id.0));
        if !authorized {
            bot.send_message(msg.chat.id, "⛔ You are not an authorized user!")
                .await?;
            info!(
                chat_id = %msg.chat.id,
                user = ?msg.from.as_ref().map(|u| u.id.0),
                "Rejected command from unauthorized user"
            );
            return Ok(());
        }
    }

    match cmd {
        Command::Start => handle_start(bot, msg).await,
        Command::Help => handle_help(bot, msg).await,
        Command::Lock => handle_lock(bot, msg, state).await,
        Command::Unlock => handle_unlock(bot, msg, state).await,
        Command::Wake => handle_wake(bot, msg, state).await,
        Command::Climate(arg) => handle_climate(bot, msg, state, arg).await,
        Command::Sentry(arg) => handle_sentry(bot, msg, state, arg).await,
        Command::Honk => handle_honk(bot, msg, state).await,
        Command::Flash => handle_flash(bot, msg, state).await,
        Command::Vent => handle_vent(bot, msg, state).await,
        Command::Trunk(arg) => handle_trunk(bot, msg, state, arg).await,
        Command::Boombox => handle_boombox(bot, msg, state).await,
        Command::Cars => handle_cars(bot, msg, state).await,
        Command::Car(arg) => handle_car(bot, msg, state, arg).await,
        Command::Info => handle_info(bot, msg, state).await,
    }
}
