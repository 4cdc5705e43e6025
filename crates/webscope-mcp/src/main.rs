//! Webscope MCP Server — entry point.

use std::sync::Arc;
use tokio::sync::Mutex;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use webscope::BrowserConfig;
use webscope_mcp::config::resolve_chrome_path;
use webscope_mcp::protocol::ProtocolHandler;
use webscope_mcp::session::BrowserSessionManager;
use webscope_mcp::tools::ToolRegistry;
use webscope_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "webscope-mcp",
    about = "MCP server for Webscope — browser automation and Lighthouse audits for LLM clients",
    version
)]
struct Cli {
    /// Path to the Chrome/Chromium binary.
    #[arg(long)]
    chrome: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// Path to the Chrome/Chromium binary.
        #[arg(long)]
        chrome: Option<String>,

        /// Log level (trace, debug, info, warn, error).
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Start MCP server over HTTP.
    #[cfg(feature = "http")]
    ServeHttp {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:3200")]
        addr: String,

        /// Path to the Chrome/Chromium binary.
        #[arg(long)]
        chrome: Option<String>,

        /// Log level (trace, debug, info, warn, error).
        #[arg(long)]
        log_level: Option<String>,

        /// Bearer token for authentication.
        /// Also reads from WEBSCOPE_TOKEN env var.
        #[arg(long)]
        token: Option<String>,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   webscope-mcp completions bash > ~/.local/share/bash-completion/completions/webscope-mcp
    ///   webscope-mcp completions zsh > ~/.zfunc/_webscope-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,
}

fn session_config(chrome: Option<String>) -> BrowserConfig {
    BrowserConfig {
        chrome_path: resolve_chrome_path(chrome.as_deref()),
        ..BrowserConfig::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        chrome: None,
        log_level: None,
    }) {
        Commands::Serve {
            chrome,
            log_level: _,
        } => {
            let config = session_config(chrome.or(cli.chrome));
            let session = Arc::new(Mutex::new(BrowserSessionManager::new(config)));
            let handler = ProtocolHandler::new(session.clone());
            let transport = StdioTransport::new(handler);

            tokio::select! {
                result = transport.run() => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                }
            }

            session.lock().await.close();
        }

        #[cfg(feature = "http")]
        Commands::ServeHttp {
            addr,
            chrome,
            log_level: _,
            token,
        } => {
            use webscope_mcp::transport::http::HttpTransport;

            // Resolve token: CLI flag > env var
            let effective_token = token.or_else(|| std::env::var("WEBSCOPE_TOKEN").ok());
            if effective_token.is_some() {
                tracing::info!("Auth: bearer token required");
            }

            let config = session_config(chrome.or(cli.chrome));
            let session = Arc::new(Mutex::new(BrowserSessionManager::new(config)));
            let handler = ProtocolHandler::new(session.clone());
            let transport = HttpTransport::with_token(effective_token, handler);

            tokio::select! {
                result = transport.run(&addr) => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                }
            }

            session.lock().await.close();
        }

        Commands::Info => {
            let capabilities = webscope_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "webscope-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            webscope_mcp::repl::run()?;
        }
    }

    Ok(())
}
