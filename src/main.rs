use clap::{Parser, Subcommand};
use std::sync::Arc;
use twitch_irc::message::ServerMessage;

mod application;
mod domain;
mod infrastructure;

use application::services::{shared_config, Responder, SettingsService};
use domain::entities::ChatMessage;
use domain::traits::{Chat, Store};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::twitch::{Incoming, TwitchAdapter};
use infrastructure::config::Config;
use infrastructure::storage::{ConfigStore, DEFAULT_PATH};

#[derive(Parser)]
#[command(name = "botspark")]
#[command(about = "A Twitch chat auto-responder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bot config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Channel/commands file path
    #[arg(short, long, default_value = DEFAULT_PATH)]
    data: String,

    /// Twitch OAuth token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to chat and start responding
    Run,
    /// Show the configured channel and commands
    List,
    /// Add a command; response text can be set now or later
    Add { name: String, text: Option<String> },
    /// Remove the command at an index (as shown by list)
    Remove { index: usize },
    /// Replace the response text of the command at an index
    SetText { index: usize, text: String },
    /// Set the Twitch channel to join
    Channel { name: String },
    /// Generate default bot config
    InitConfig,
    /// Show version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new(&cli.data);

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.token, store);
        }
        Commands::List => {
            list_commands(&store);
        }
        Commands::Add { name, text } => with_settings(store, |settings| async move {
            match settings.add_command(&name, &text.unwrap_or_default()).await {
                Ok(index) => println!("Added command at index {}", index),
                Err(e) => eprintln!("Error: {}", e),
            }
        }),
        Commands::Remove { index } => with_settings(store, |settings| async move {
            match settings.remove_command(index).await {
                Ok(entry) => println!("Removed {}", entry.name()),
                Err(e) => eprintln!("Error: {}", e),
            }
        }),
        Commands::SetText { index, text } => with_settings(store, |settings| async move {
            match settings.set_text(index, &text).await {
                Ok(()) => println!("Updated command text"),
                Err(e) => eprintln!("Error: {}", e),
            }
        }),
        Commands::Channel { name } => with_settings(store, |settings| async move {
            match settings.set_channel(&name).await {
                Ok(()) => println!(
                    "Channel set to {}",
                    settings.snapshot().await.channel_name()
                ),
                Err(e) => eprintln!("Error: {}", e),
            }
        }),
        Commands::InitConfig => {
            init_config();
        }
        Commands::Version => {
            println!("botspark v{}", env!("CARGO_PKG_VERSION"));
        }
    }
}

/// Runs one editing action against the stored aggregate.
fn with_settings<F, Fut>(store: ConfigStore, action: F)
where
    F: FnOnce(SettingsService<ConfigStore>) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async move {
        let settings = SettingsService::new(shared_config(store.load()), store);
        action(settings).await;
    });
}

fn run_bot(config_path: String, token_override: Option<String>, store: ConfigStore) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting botspark as {}", config.bot.name);
    tracing::debug!("User config path: {}", store.path().display());

    let user = shared_config(store.load());
    let responder = Responder::new(Arc::clone(&user));

    let rt = tokio::runtime::Runtime::new().unwrap();

    if let Some(token) = token_override.or_else(|| config.twitch_token()) {
        rt.block_on(async {
            let channel = user.read().await.channel_name().to_string();
            if channel.is_empty() {
                tracing::error!("No channel configured. Set one with: botspark channel <name>");
                return;
            }

            let (bot, incoming) = TwitchAdapter::connect(&config.bot.name, &token);
            run_twitch_bot(bot, incoming, responder, &channel).await;
        });
    } else {
        // Run console bot (dev mode)
        tracing::warn!("No Twitch token configured, starting console mode");
        rt.block_on(async {
            let bot = ConsoleAdapter::new();
            run_console_bot(bot, responder).await;
        });
    }
}

async fn run_twitch_bot(
    bot: TwitchAdapter,
    mut incoming: Incoming,
    responder: Responder,
    channel: &str,
) {
    if let Err(e) = bot.join(channel) {
        tracing::error!("Failed to join #{}: {}", channel, e);
        return;
    }

    let info = bot.bot_info();
    tracing::info!("Bot {} joined #{}", info.name, channel);

    loop {
        tokio::select! {
            message = incoming.recv() => {
                let Some(message) = message else {
                    tracing::info!("Connection closed");
                    break;
                };
                if let ServerMessage::Privmsg(msg) = message {
                    let chat = TwitchAdapter::to_chat_message(&msg);
                    tracing::debug!(
                        "[{}] {} at {}: {}",
                        chat.id, chat.sender, chat.timestamp, chat.text
                    );
                    handle_message(&bot, &responder, &chat).await;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }
}

async fn run_console_bot(bot: ConsoleAdapter, responder: Responder) {
    let info = bot.bot_info();
    tracing::info!("Console mode: type a chat line, ctrl-d to quit");

    loop {
        let Some(input) = bot.read_line("> ").await else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        let message = ChatMessage::new("console", info.name.as_str(), input);
        handle_message(&bot, &responder, &message).await;
    }
}

/// One response per matching message; an empty text is a matched no-op.
async fn handle_message<B: Chat>(bot: &B, responder: &Responder, message: &ChatMessage) {
    let Some(response) = responder.on_message(message).await else {
        return;
    };
    if response.is_empty() {
        return;
    }

    tracing::info!("Responding to {} in #{}", message.text, message.channel);
    if let Err(e) = bot.say(&message.channel, &response).await {
        tracing::error!("Failed to send response: {}", e);
    }
}

fn list_commands(store: &ConfigStore) {
    let config = store.load();

    if config.channel_name().is_empty() {
        println!("Channel: (not set)");
    } else {
        println!("Channel: {}", config.channel_name());
    }

    println!("Commands:");
    for (index, entry) in config.commands().entries().iter().enumerate() {
        if entry.text().is_empty() {
            println!("  [{}] {} (no text)", index, entry.name());
        } else {
            println!("  [{}] {} -> {}", index, entry.name(), entry.text());
        }
    }
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
