//! TeXChat TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Chat as alice against the in-process loopback channel
//! texchat-tui /alice
//!
//! # Chat as bob against a WebSocket server, logging to a file
//! texchat-tui /bob --server ws://localhost:3000 --log-file texchat.log
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::{Parser, ValueEnum};
use texchat_app::{ChatView, Outcome, PrivateLabel, Route, Runtime, ViewConfig};
use texchat_tui::{ChannelMode, TerminalDriver, transport::DEFAULT_RECONNECT_BACKOFF};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Label rule for private messages.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PrivateLabelArg {
    /// Show the other party's name.
    Counterpart,
    /// Show "Me" on messages you sent.
    Me,
}

impl From<PrivateLabelArg> for PrivateLabel {
    fn from(arg: PrivateLabelArg) -> Self {
        match arg {
            PrivateLabelArg::Counterpart => Self::Counterpart,
            PrivateLabelArg::Me => Self::SenderAsMe,
        }
    }
}

/// TeXChat terminal client
#[derive(Parser, Debug)]
#[command(name = "texchat-tui")]
#[command(about = "Terminal chat client with typing indicators")]
#[command(version)]
struct Args {
    /// Route to open, e.g. `/alice`. The segment is your display name.
    route: Route,

    /// WebSocket URL of the chat server
    ///
    /// If not provided, runs against an in-process loopback channel.
    #[arg(short, long)]
    server: Option<String>,

    /// Idle time after the last keystroke before "stopped typing" is sent
    #[arg(long, default_value = "1000")]
    typing_idle_ms: u64,

    /// Label rule for private messages
    #[arg(long, value_enum, default_value_t = PrivateLabelArg::Counterpart)]
    private_label: PrivateLabelArg,

    /// Delay between reconnect attempts, in milliseconds
    #[arg(long)]
    reconnect_ms: Option<u64>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let writer = Mutex::new(File::create(path)?);
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .with(filter)
            .init();
    }

    let Some(username) = args.route.username() else {
        return Err(format!("nothing to show at {}; open /<username>", args.route).into());
    };

    let config = ViewConfig {
        typing_idle: Duration::from_millis(args.typing_idle_ms),
        private_label: args.private_label.into(),
    };
    let mode = match args.server {
        Some(url) => ChannelMode::WebSocket {
            url,
            backoff: args.reconnect_ms.map_or(DEFAULT_RECONNECT_BACKOFF, Duration::from_millis),
        },
        None => ChannelMode::Loopback,
    };

    tracing::info!(%username, ?mode, "starting chat view");

    let driver = TerminalDriver::new(mode)?;
    let mut runtime = Runtime::new(driver, ChatView::with_config(username, config));
    let outcome = runtime.run().await?;

    match outcome {
        Outcome::LoggedOut => tracing::info!(route = %Route::Root, "logged out"),
        Outcome::Quit => tracing::info!("quit"),
    }

    Ok(())
}
