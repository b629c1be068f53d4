//! Valet Telegram Bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx VALET_API_TOKEN=xxx ALLOWED_USER_IDS=123 \
//!     cargo run -p valet-telegram
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;
use valet_core::config;
use valet_telegram::{ValetBot, ValetState};

/// Valet Telegram Bot - remote-control your car from Telegram
#[derive(Parser, Debug)]
#[command(name = "valet-telegram")]
#[command(about = "Telegram bot for Valet - send remote commands to your car")]
struct Args {
    /// Publish the slash-command menu to Telegram before starting
    #[arg(short, long)]
    register_commands: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load environment variables from config directory first
    let env_path = config::env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    // Also try a local .env
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "valet_telegram=info,valet_api=info,valet_core=info,teloxide=warn",
        1 => "valet_telegram=debug,valet_api=debug,valet_core=debug,teloxide=info",
        2 => "valet_telegram=trace,valet_api=trace,valet_core=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = config::ensure_all_dirs() {
        tracing::warn!(error = %e, "Failed to create state directories");
    }

    let state = ValetState::from_env(config::charging_log_file())?;
    let bot = ValetBot::new(state)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n🚘 Valet Telegram Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    if args.register_commands {
        bot.register_commands().await?;
        println!("   Command menu registered");
    }

    println!("\n📱 Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
