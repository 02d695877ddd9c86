use clap::{Parser, Subcommand};
use std::sync::Arc;

mod application;
mod commands;
mod domain;
mod infrastructure;

use application::messaging::{spawn_delivery, Dispatcher, Outbox};
use domain::entities::{Channel, ChannelKind, CommandRegistry, Message, User};
use domain::traits::Gateway;
use infrastructure::adapters::console::{ConsoleAdapter, GrantAll};
use infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "parrot-bot")]
#[command(about = "A prefix-command chat bot framework", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Command prefix (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
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

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.prefix);
        }
        Commands::Version => {
            println!("parrot-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String, prefix_override: Option<String>) {
    // Load config
    let mut config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    if let Some(prefix) = prefix_override {
        config.bot.prefix = prefix;
    }

    tracing::info!("Starting parrot-bot: {}", config.bot.name);

    // Build the command registry once; it is read-only afterwards
    let mut registry = CommandRegistry::new();
    if let Err(e) = commands::register_defaults(&mut registry) {
        tracing::error!("Failed to register commands: {}", e);
        return;
    }
    tracing::info!("Registered {} commands", registry.len());

    let console_enabled = config
        .adapters
        .console
        .as_ref()
        .map(|c| c.enabled)
        .unwrap_or(true);
    if !console_enabled {
        tracing::error!("No enabled adapter in config");
        return;
    }

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        run_console_bot(config, registry).await;
    });
}

async fn run_console_bot(config: Config, registry: CommandRegistry) {
    let gateway: Arc<dyn Gateway> = Arc::new(ConsoleAdapter::new(config.bot.name.clone()));
    let (outbox, rx) = Outbox::channel();
    let delivery = spawn_delivery(Arc::clone(&gateway), rx);

    let dispatcher = Dispatcher::new(
        &config.bot.prefix,
        Arc::new(registry),
        Arc::new(GrantAll),
        outbox,
    )
    .with_rejection_logging(config.dispatch.log_rejections);

    let bot_user = gateway.bot_user();
    tracing::info!("Bot started: @{} (prefix '{}')", bot_user, dispatcher.prefix());

    // Main loop (for console mode)
    let sender = User::new("console-user");
    let channel = Channel::new("console", ChannelKind::Text).with_name("console");
    loop {
        let Some(input) = ConsoleAdapter::read_line("> ").await else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        let message = Message::new(input, sender.clone(), channel.clone());
        dispatcher.dispatch(message).await;

        // Let queued replies print before the next prompt
        tokio::task::yield_now().await;
    }

    drop(dispatcher);
    let _ = delivery.await;
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
