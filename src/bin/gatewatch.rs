//! Gatewatch CLI binary.
//!
//! Payload inspection from the command line or as an HTTP service.
//!
//! # Commands
//!
//! - `scan` - Inspect one decoded input string
//! - `server` - Start the HTTP inspection server

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gatewatch::{
    config::Config,
    inspect::{InspectConfig, InspectMode, Inspector},
    server::{create_router, AppState, ServerConfig},
    VERSION,
};

#[derive(Parser)]
#[command(name = "gatewatch")]
#[command(version = VERSION)]
#[command(about = "Payload inspection - signature automaton with structural validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a decoded input string
    Scan {
        /// Input in the form `tokens|payload` (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Inspection mode (structural, signature, full)
        #[arg(short, long, default_value = "full")]
        mode: String,

        /// Maximum nesting depth
        #[arg(long, default_value = "3")]
        max_depth: usize,

        /// Scan for signatures even on a handshake violation
        #[arg(long)]
        scan_on_violation: bool,

        /// Enable the redundant regex matcher
        #[arg(long)]
        regex_net: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP inspection server
    Server {
        /// Listen port (overrides config file and PORT env)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// TOML config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Inspection mode (structural, signature, full)
        #[arg(short, long)]
        mode: Option<String>,

        /// Maximum nesting depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Scan for signatures even on a handshake violation
        #[arg(long)]
        scan_on_violation: bool,

        /// Enable the redundant regex matcher
        #[arg(long)]
        regex_net: bool,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            input,
            file,
            mode,
            max_depth,
            scan_on_violation,
            regex_net,
            json,
        } => cmd_scan(input, file, &mode, max_depth, scan_on_violation, regex_net, json),

        Commands::Server {
            port,
            host,
            bind_all,
            config,
            mode,
            max_depth,
            scan_on_violation,
            regex_net,
            no_cors,
            verbose,
        } => cmd_server(
            port,
            host,
            bind_all,
            config,
            mode.as_deref(),
            max_depth,
            scan_on_violation,
            regex_net,
            no_cors,
            verbose,
        ),
    }
}

fn parse_mode(mode: &str) -> InspectMode {
    match mode.parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

fn cmd_scan(
    input: Option<String>,
    file: Option<PathBuf>,
    mode: &str,
    max_depth: usize,
    scan_on_violation: bool,
    regex_net: bool,
    json: bool,
) -> anyhow::Result<()> {
    let content = read_input(input, file)?;
    let content = content.trim_end_matches(['\n', '\r']);

    let inspector = Inspector::new(InspectConfig {
        mode: parse_mode(mode),
        max_depth,
        scan_on_violation,
        regex_net,
    });

    let verdict = inspector.inspect(content);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": verdict.status,
                "detected": verdict.detected,
                "wire": verdict.wire(),
            }))?
        );
    } else {
        println!("{}", verdict.wire());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_server(
    port: Option<u16>,
    host: Option<String>,
    bind_all: bool,
    config: Option<PathBuf>,
    mode: Option<&str>,
    max_depth: Option<usize>,
    scan_on_violation: bool,
    regex_net: bool,
    no_cors: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    // Initialize logging
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Layered settings: config file, then environment, then CLI flags
    let mut settings = match config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    settings = settings.overlay_env();

    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(mode) = mode {
        settings.inspect.mode = parse_mode(mode);
    }
    if let Some(max_depth) = max_depth {
        settings.inspect.max_depth = max_depth;
    }
    if scan_on_violation {
        settings.inspect.scan_on_violation = true;
    }
    if regex_net {
        settings.inspect.regex_net = true;
    }

    let addr: std::net::SocketAddr = settings.server.listen_addr().parse()?;
    let mut server_config = ServerConfig::default()
        .with_addr(addr)
        .with_inspect(settings.inspect);

    if bind_all {
        server_config = server_config.bind_all();
    }
    if no_cors {
        server_config = server_config.without_cors();
    }

    let state = Arc::new(AppState::new(server_config.clone()));
    let app = create_router(Arc::clone(&state));

    tracing::info!("Starting Gatewatch server on {}", server_config.addr);
    tracing::info!(
        "Mode: {:?}, max depth {}, {} signatures, {} automaton states",
        state.inspector.config().mode,
        state.inspector.config().max_depth,
        gatewatch::inspect::signature_count(),
        state.inspector.automaton_states(),
    );
    if state.inspector.config().scan_on_violation {
        tracing::info!("Scanning payloads even on handshake violations");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(server_config.addr).await?;
        axum::serve(listener, app).await?;
        Ok::<_, anyhow::Error>(())
    })
}

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    match (input, file) {
        (Some(content), _) if content != "-" => Ok(content),
        (_, Some(path)) => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        },
    }
}
