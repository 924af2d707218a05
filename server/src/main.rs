use clap::Parser;
use log::{error, info};
use server::config::{
    ServerConfig, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_GRID_SIZE, DEFAULT_PORT,
};
use server::dictionary::Dictionary;
use server::network::Server;
use server::service::GameService;
use std::path::PathBuf;
use std::sync::Arc;

// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,
    /// Server port to listen on
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Word list, one word per line (defaults to the bundled list)
    #[clap(short, long)]
    dictionary: Option<PathBuf>,
    /// Largest board size a client may request
    #[clap(long, default_value_t = DEFAULT_MAX_GRID_SIZE)]
    max_grid_size: usize,
    /// Maximum number of simultaneous connections
    #[clap(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            dictionary_path: args.dictionary,
            max_grid_size: args.max_grid_size,
            max_connections: args.max_connections,
        }
    }
}

/// Loads the dictionary, then serves clients until Ctrl+C
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = ServerConfig::from(Args::parse());

    // An empty dictionary would refuse every word, so fail loudly instead.
    let dictionary = match &config.dictionary_path {
        Some(path) => Dictionary::load(path).map_err(|e| {
            error!("{}", e);
            e
        })?,
        None => {
            let dictionary = Dictionary::bundled();
            info!("Using bundled word list ({} words)", dictionary.len());
            dictionary
        }
    };
    if dictionary.is_empty() {
        error!("Dictionary contains no words");
        return Err("dictionary contains no words".into());
    }

    let service = Arc::new(GameService::new(Arc::new(dictionary), &config));
    let server = Server::bind(&config.address(), service).await?;

    tokio::select! {
        _ = server.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
