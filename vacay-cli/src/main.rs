//! CLI entry point for vacay

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use tokio::io::AsyncBufReadExt;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use vacay_agent::AgentFactory;
use vacay_core::config::{Config, ConfigLoader};
use vacay_core::logging::init_logging;
use vacay_core::session::SessionCache;
use vacay_manager::{dispatch, run_server, AgentCache, AppState, ChatRequest, ContentType};
use vacay_tools::{booking_tools, source_from_config};

#[derive(Parser)]
#[command(name = "vacay")]
#[command(about = "Conversational vacation booking assistant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP chat server
    Serve {
        /// Address to bind, overrides server.host
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on, overrides server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat with the assistant in the terminal
    Chat {
        /// Session id for conversation continuity
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_serve(&config_loader, host, port).await?;
        }
        Commands::Chat { session } => {
            run_chat(&config_loader, session).await?;
        }
        Commands::Status => {
            run_status(&config_loader)?;
        }
    }

    Ok(())
}

/// Wire the booking source, tools and agent factory into a session cache
fn build_sessions(config: &Config) -> Result<Arc<AgentCache>> {
    if !config.provider.is_configured() {
        warn!("Azure OpenAI provider is not configured; new sessions will fail");
    }

    let source = source_from_config(&config.booking)?;
    let tools = Arc::new(booking_tools(source));
    let factory = AgentFactory::new(config, tools);

    Ok(Arc::new(SessionCache::from_config(
        &config.sessions,
        factory.into_session_factory(),
    )))
}

/// Run the HTTP server until Ctrl+C
async fn run_serve(loader: &ConfigLoader, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = loader.load()?;
    let _log_guard = init_logging(&config.logging);

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("{}", style("Starting vacay server...").bold().cyan());
    println!(
        "Sessions: ttl {}s, sweep every {}s",
        config.sessions.ttl_secs, config.sessions.sweep_interval_secs
    );

    let sessions = build_sessions(&config)?;
    sessions.start();

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let state = AppState::new(sessions.clone());
    let server_config = config.server.clone();
    let mut server_handle =
        tokio::spawn(async move { run_server(state, &server_config, shutdown_rx).await });

    println!(
        "{}",
        style(format!(
            "Listening on http://{}:{}. Press Ctrl+C to stop.",
            config.server.host, config.server.port
        ))
        .green()
    );

    let served = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            println!("\n{}", style("Shutting down...").yellow());
            let _ = shutdown_tx.send(());
            (&mut server_handle).await
        }
        result = &mut server_handle => result,
    };

    if !sessions.stop().await {
        warn!("Session sweeper was not running at shutdown");
    }
    info!("{} sessions dropped on shutdown", sessions.size());
    served??;

    println!("{}", style("Server stopped.").green());
    Ok(())
}

/// Converse in the terminal through the same dispatch path as `/chat`
async fn run_chat(loader: &ConfigLoader, session: Option<String>) -> Result<()> {
    let config = loader.load()?;
    let _log_guard = init_logging(&config.logging);

    let sessions = build_sessions(&config)?;
    sessions.start();

    let session_id = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    info!("Chatting on session {}", session_id);
    println!("{}", style("Type 'exit' to quit.").dim());

    let mut request = ChatRequest {
        message_type: ContentType::Text,
        message_content: String::new(),
        session_id,
    };

    let greeting = dispatch(&sessions, &request).await?;
    println!("\n{} {}", style("Assistant:").bold().cyan(), greeting.response_content);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n{} ", style("You:").bold().green());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        request.message_content = text.to_string();
        match dispatch(&sessions, &request).await {
            Ok(response) => {
                println!("\n{} {}", style("Assistant:").bold().cyan(), response.response_content)
            }
            Err(e) => {
                error!("Chat turn failed: {}", e);
                println!("\n{} {}", style("Error:").red().bold(), e);
            }
        }
    }

    sessions.stop().await;
    Ok(())
}

/// Show the effective configuration with secrets hidden
fn run_status(loader: &ConfigLoader) -> Result<()> {
    let config = loader.load()?;

    println!("{}", style("vacay status").bold().cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));

    println!("{}", style("Configuration:").bold());
    println!("  Config directory: {}", loader.config_dir().display());
    println!(
        "  Config file: {}",
        if loader.config_path().exists() {
            style("found").green()
        } else {
            style("not found, using defaults").dim()
        }
    );
    println!();

    println!("{}", style("Provider:").bold());
    let provider = &config.provider;
    let status = if provider.is_configured() {
        style("configured").green()
    } else {
        style("not configured").red()
    };
    println!("  Azure OpenAI: {}", status);
    println!("  Endpoint: {}", or_unset(&provider.endpoint));
    println!("  Deployment: {}", or_unset(&provider.deployment));
    println!("  API version: {}", provider.api_version);
    println!(
        "  API key: {}",
        if provider.api_key.is_empty() { "not set" } else { "set" }
    );
    println!();

    println!("{}", style("Booking:").bold());
    println!("  Source: {}", config.booking.source);
    match config.booking.source.as_str() {
        "remote" => {
            println!("  API base: {}", or_unset(&config.booking.api_base));
            println!("  Package: {}", or_unset(&config.booking.package_id));
            println!("  Environment: {}", config.booking.environment);
        }
        _ => println!("  Data directory: {}", config.booking.data_dir),
    }
    println!();

    println!("{}", style("Sessions:").bold());
    println!("  TTL: {}s", config.sessions.ttl_secs);
    println!("  Sweep interval: {}s", config.sessions.sweep_interval_secs);
    println!();

    println!("{}", style("Server:").bold());
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!("  Static UI: {}", config.server.static_dir);

    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.trim().is_empty() {
        "(not set)"
    } else {
        value
    }
}
