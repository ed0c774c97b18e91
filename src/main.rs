use argh::FromArgs;
use perkdex::{AppState, create_app, perks};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(FromArgs, Debug)]
/// Perkdex: A local-first directory of perks.
struct Args {
    /// host to bind to
    #[argh(option, default = "String::from(\"127.0.0.1\")")]
    host: String,

    /// port to listen on (0 for random available port)
    #[argh(option, short = 'p', default = "0")]
    port: u16,

    /// open the browser automatically
    #[argh(switch, short = 'o')]
    open: bool,

    /// JSON Lines file with perk records (defaults to $PERKS_DATA or perks.jsonl)
    #[argh(option, short = 'd')]
    data: Option<String>,

    /// URL of a backend endpoint returning perks as JSON, used instead of --data
    #[argh(option, short = 'r')]
    remote: Option<String>,

    /// seconds to wait for the remote backend
    #[argh(option, default = "10")]
    timeout: u64,
}

impl Args {
    /// `--data`, then `$PERKS_DATA`, then `perks.jsonl`.
    fn data_path(&self) -> String {
        self.data
            .clone()
            .or_else(|| std::env::var("PERKS_DATA").ok())
            .unwrap_or_else(|| perks::DEFAULT_DATA_FILE.to_string())
    }

    fn client(&self) -> perks::Client {
        let client = perks::Client::new();
        match &self.remote {
            Some(url) => client.with_remote(url, Duration::from_secs(self.timeout)),
            None => client.with_file(self.data_path()),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perkdex=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Args = argh::from_env();
    if args.remote.is_some() && args.data.is_some() {
        tracing::warn!("Both --remote and --data given, using --remote");
    }

    let state = AppState::new().with_client(args.client());
    tracing::info!("Serving perks from {}", state.client.source_label());
    let app = create_app(Arc::new(state));

    let addr_str = format!("{}:{}", args.host, args.port);
    let addr: SocketAddr = match addr_str.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid host or port {}: {}", addr_str, e);
            std::process::exit(2);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    let url = match listener.local_addr() {
        Ok(actual_addr) => format!("http://{}/explore", actual_addr),
        Err(_) => format!("http://{}/explore", addr),
    };

    tracing::info!("{}", url);

    if args.open && let Err(e) = open::that(&url) {
        tracing::error!("Failed to open browser: {}", e);
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
