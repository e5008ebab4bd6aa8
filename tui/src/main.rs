//! Chatdeck Entry Point
//!
//! Launches the terminal chat client.
//!
//! Usage:
//!   chatdeck [OPTIONS]
//!
//! Options:
//!   --api-url <URL>              Conversation service (default: http://localhost:8100)
//!   -c, --config <FILE>          Config file (default: ~/.config/chatdeck/client.toml)
//!   --log-file <PATH>            Write logs here instead of stderr
//!   --request-timeout-ms <MS>    Per-request timeout, 0 = none

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatdeck_core::{
    load_config, load_config_from_path, ChatViewModel, ClientConfig, ConfigOverrides,
    HttpConversationService,
};
use chatdeck_tui::App;

/// Default log filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "chatdeck_core=info,chatdeck=info";

/// Chatdeck - terminal client for a conversation service
#[derive(Parser, Debug)]
#[command(name = "chatdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Conversation service base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "CHATDECK_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path (logs go to stderr otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Per-request timeout in milliseconds (0 = none)
    #[arg(long, value_name = "MS")]
    request_timeout_ms: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref url) = self.api_url {
            overrides = overrides.with_base_url(url.clone());
        }
        if let Some(ms) = self.request_timeout_ms {
            overrides = overrides.with_request_timeout_ms(ms);
        }
        if let Some(ref path) = self.log_file {
            overrides = overrides.with_log_file(path.clone());
        }
        overrides
    }
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Load, override and validate the configuration
///
/// The log file is only known once this returns, so anything logged while
/// loading goes to `writer` through a subscriber scoped to this call.
fn load_client_config<W>(
    args: &Args,
    filter: EnvFilter,
    writer: W,
) -> anyhow::Result<ClientConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut config = match args.config.clone() {
            Some(path) => load_config_from_path(Some(path)),
            None => load_config(),
        }
        .context("Failed to load configuration")?;
        args.overrides().apply(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    })
}

/// Initialize logging to a file, or stderr when none is configured
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = log_filter();

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr);
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_client_config(&args, log_filter(), io::stderr)?;
    init_logging(config.log_file.as_deref())?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: chatdeck requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin/stdout are piped or the session is");
        eprintln!("non-interactive (CI, container, SSH without -t).");
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let service = HttpConversationService::from_config(&config)
        .context("Failed to create conversation service client")?;

    tracing::info!(
        base_url = %config.base_url,
        source = %config.source(),
        "Starting chatdeck"
    );

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(ChatViewModel::new(service)).with_endpoint(config.base_url.clone());
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}
