//! Menuflow CLI Binary
//!
//! Console front end for the menu state machine: an interactive demo menu plus
//! configuration and id-classification helpers.

use clap::{Parser, Subcommand};
use menuflow::action_id::IdClassifier;
use menuflow::collector::{self, Activation, CollectorOptions};
use menuflow::config::{ConfigLoader, MenuflowConfig};
use menuflow::error::MenuError;
use menuflow::frame::{ActionRow, ButtonStyle, Control, Embed, Frame};
use menuflow::logging::{init_logging, LoggingConfig};
use menuflow::menu::{ForwardOptions, MenuManager, MenuOptions, Navigation};
use menuflow::number_block::NumberBlock;
use menuflow::pager::PageContents;
use menuflow::render::{ConsoleTransport, MessageTransport, SendTarget};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info, warn};

const CATALOG_PAGER: &str = "catalog";
const AMOUNT_BLOCK: &str = "amount";

#[derive(Parser, Debug)]
#[command(name = "menuflow")]
#[command(about = "Frame-stack menus for interactive messages")]
struct Cli {
    /// Configuration file (overrides the user config file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error, off
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: text or json
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an interactive menu on the console. Each input line is "<id>" or "<user> <id>".
    Demo {
        /// User who opens the menu
        #[arg(long, default_value = "console")]
        user: String,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Print JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print how each id is classified with no pager injected
    Classify {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Menuflow CLI starting");

    match execute(&cli.command, &config) {
        Ok(()) => info!("Command completed successfully"),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Config file logging settings with CLI flags layered on top.
fn build_logging_config(cli: &Cli, config: &MenuflowConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}

fn execute(command: &Commands, config: &MenuflowConfig) -> Result<(), MenuError> {
    match command {
        Commands::Config { json: false } => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Commands::Config { json: true } => {
            let text = serde_json::to_string_pretty(config).map_err(|e| {
                MenuError::ConfigError(format!("Failed to render config: {}", e))
            })?;
            println!("{}", text);
            Ok(())
        }
        Commands::Classify { ids } => {
            let classifier = IdClassifier::new(config.menu.ignore_actions.iter().cloned());
            for id in ids {
                println!("{}\t{}", id, classifier.classify(id));
            }
            Ok(())
        }
        Commands::Demo { user } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| MenuError::ConfigError(format!("Failed to start runtime: {}", e)))?;
            let result = runtime.block_on(run_demo(config, user));
            // The stdin reader may still be parked on a blocking read.
            runtime.shutdown_background();
            result
        }
    }
}

fn root_frame() -> Frame {
    Frame::text("Main menu").with_row(ActionRow::new(vec![
        Control::styled_button("open-catalog", "Catalog", ButtonStyle::Primary),
        Control::styled_button("open-amount", "Amount", ButtonStyle::Primary),
        Control::styled_button("cancel", "Close", ButtonStyle::Danger),
    ]))
}

fn catalog_frame() -> Frame {
    Frame::text("Catalog").with_row(ActionRow::new(vec![Control::styled_button(
        "back-catalog",
        "Back",
        ButtonStyle::Secondary,
    )]))
}

fn catalog_pages() -> PageContents {
    PageContents::from_embeds(
        ["Maps", "Tools", "Rations"]
            .iter()
            .enumerate()
            .map(|(i, title)| {
                Embed::titled(*title)
                    .with_description(format!("Aisle {}", i + 1))
                    .with_footer(format!("Page {} of 3", i + 1))
            })
            .collect(),
    )
}

fn amount_frame(block: &NumberBlock) -> Frame {
    Frame::text(format!("Amount: {}", block.total())).with_rows(block.rows().iter().cloned())
}

async fn run_demo(config: &MenuflowConfig, user: &str) -> Result<(), MenuError> {
    let transport: Arc<dyn MessageTransport> =
        Arc::new(ConsoleTransport::stdout(std::io::stdout().is_terminal()));
    let target = SendTarget::Channel {
        channel_id: "console".to_string(),
    };
    let mut menu = MenuManager::create(
        transport,
        &target,
        MenuOptions::from_settings(root_frame(), &config.menu),
    )
    .await?;
    menu.spawn_page_container(catalog_pages(), Some(CATALOG_PAGER))?;
    let mut block = NumberBlock::new(AMOUNT_BLOCK)?;

    let mut options = CollectorOptions::new(config.menu.time_limit());
    if !config.menu.same_user_only {
        options = options.with_filter(|_| true);
    }
    let (sender, mut collector) = collector::channel(user, options);
    menu.attach_collector(collector.handle());

    let default_user = user.to_string();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut tokens = line.split_whitespace();
            let activation = match (tokens.next(), tokens.next()) {
                (Some(id), None) => Activation::new(id, default_user.as_str()),
                (Some(user), Some(id)) => Activation::new(id, user),
                _ => continue,
            };
            if !sender.send(activation) {
                break;
            }
        }
    });

    loop {
        let activation = match collector.next().await {
            Ok(activation) => activation,
            Err(end) => {
                info!(reason = ?end, "Demo collector ended");
                break;
            }
        };
        let id = activation.custom_id.as_str();

        if id == block.confirm_id() {
            println!("Confirmed amount: {}", block.total());
            menu.frame_backward().await?;
            continue;
        }
        if let Some(total) = block.evaluate(id) {
            println!("Amount: {}", total);
            continue;
        }

        match menu.handle_activation(id).await? {
            Navigation::Forward(next) => match next.as_str() {
                "open-catalog" => {
                    menu.frame_forward(catalog_frame(), ForwardOptions::with_pager(CATALOG_PAGER))
                        .await?
                }
                "open-amount" => {
                    menu.frame_forward(amount_frame(&block), ForwardOptions::default())
                        .await?
                }
                other => warn!(id = %other, "No frame bound to forward action"),
            },
            Navigation::Closed => break,
            Navigation::Paged { .. } | Navigation::Back { .. } | Navigation::Ignored => {}
        }
    }

    if !menu.is_destroyed() {
        menu.destroy().await?;
    }
    Ok(())
}
