use clap::Parser;
use longform::core::config::{self, CliOverrides};
use longform::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "longform", about = "Terminal reader for long-form Nostr articles")]
struct Args {
    /// Relay websocket URL (ws:// or wss://)
    #[arg(short, long)]
    relay: Option<String>,

    /// Only show articles by this author (npub or hex public key)
    #[arg(short, long)]
    author: Option<String>,

    /// Maximum number of articles to request (0 = no limit)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Where to write the debug log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config problems are reported before the terminal is taken over
    let cli = CliOverrides {
        relay_url: args.relay,
        author: args.author,
        limit: args.limit,
        log_file: args.log_file,
    };
    let resolved = match config::load_config().and_then(|file| config::resolve(&file, &cli)) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("longform: {e}");
            std::process::exit(2);
        }
    };

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // rustls needs a process-wide crypto provider for wss:// relays
    let _ = rustls::crypto::ring::default_provider().install_default();

    log::info!("Longform starting up against {}", resolved.relay_url);

    tui::run(resolved).await
}
