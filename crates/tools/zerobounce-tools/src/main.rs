use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use serde_json::{Value, json};
use zerobounce_tools::{
    Settings, ToolRegistry, ZeroBounceProvider, ZeroBounceServer, build_registry, logging,
};

#[derive(Parser)]
#[command(name = "zerobounce-tools")]
#[command(about = "ZeroBounce email validation tools via CLI or MCP")]
#[command(version)]
struct Args {
    /// List available tools and exit
    #[arg(long)]
    list_tools: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single email address
    Validate {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        ip_address: String,
    },
    /// Show remaining account credits
    Credits,
    /// Upload a file for bulk validation
    Upload {
        #[arg(long)]
        file_path: String,
        #[arg(long)]
        email_column: i64,
        #[arg(long, default_value_t = 0)]
        first_name_column: i64,
        #[arg(long, default_value_t = 0)]
        last_name_column: i64,
        #[arg(long, default_value_t = 0)]
        gender_column: i64,
        #[arg(long, default_value_t = 0)]
        ip_address_column: i64,
        /// Treat the first row as data rather than a header
        #[arg(long)]
        no_header_row: bool,
        #[arg(long, default_value = "")]
        return_url: String,
    },
    /// Check the processing status of an uploaded file
    Status {
        #[arg(long)]
        file_id: String,
    },
    /// Download the results of a processed file
    GetFile {
        #[arg(long)]
        file_id: String,
    },
    /// Delete an uploaded file
    Delete {
        #[arg(long)]
        file_id: String,
    },
    /// Deprecated; prints a pointer to guess-format
    DomainSearch {
        #[arg(long)]
        domain: String,
    },
    /// Guess the email address format used by a domain
    GuessFormat {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        middle_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Start MCP server
    Mcp,
}

impl Commands {
    /// Tool name and JSON arguments for a one-shot CLI call; `None` for `mcp`.
    fn into_call(self) -> Option<(&'static str, Value)> {
        let call = match self {
            Self::Validate { email, ip_address } => (
                "validate_email",
                json!({"email": email, "ip_address": ip_address}),
            ),
            Self::Credits => ("get_credits", json!({})),
            Self::Upload {
                file_path,
                email_column,
                first_name_column,
                last_name_column,
                gender_column,
                ip_address_column,
                no_header_row,
                return_url,
            } => (
                "upload_file",
                json!({
                    "file_path": file_path,
                    "email_column": email_column,
                    "first_name_column": first_name_column,
                    "last_name_column": last_name_column,
                    "gender_column": gender_column,
                    "ip_address_column": ip_address_column,
                    "has_header_row": !no_header_row,
                    "return_url": return_url,
                }),
            ),
            Self::Status { file_id } => ("check_file_status", json!({"file_id": file_id})),
            Self::GetFile { file_id } => ("get_file", json!({"file_id": file_id})),
            Self::Delete { file_id } => ("delete_file", json!({"file_id": file_id})),
            Self::DomainSearch { domain } => ("domain_search", json!({"domain": domain})),
            Self::GuessFormat {
                domain,
                first_name,
                middle_name,
                last_name,
            } => (
                "guess_format",
                json!({
                    "domain": domain,
                    "first_name": first_name,
                    "middle_name": middle_name,
                    "last_name": last_name,
                }),
            ),
            Self::Mcp => return None,
        };
        Some(call)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let is_mcp = matches!(args.command, Some(Commands::Mcp));

    let _ = dotenvy::dotenv(); // ignore errors
    logging::init(is_mcp);

    let settings = Settings::from_env().context("failed to load ZeroBounce settings")?;
    let provider = ZeroBounceProvider::from_settings(&settings)
        .context("failed to build ZeroBounce client")?;
    let registry = build_registry(Arc::new(provider));

    if args.list_tools {
        eprintln!("Available tools ({}):", registry.len());
        for name in registry.list_names() {
            eprintln!("  - {name}");
        }
        return Ok(());
    }

    match args.command {
        Some(Commands::Mcp) => run_mcp_server(registry, settings.verify_ssl()).await,
        Some(command) => run_cli(&registry, command).await,
        None => anyhow::bail!("no command given; see --help"),
    }
}

async fn run_cli(registry: &ToolRegistry, command: Commands) -> Result<()> {
    let Some((name, args)) = command.into_call() else {
        anyhow::bail!("mcp is not a one-shot command");
    };
    let mapping = registry.dispatch_json(name, args).await?;
    println!("{}", serde_json::to_string_pretty(&mapping)?);
    Ok(())
}

async fn run_mcp_server(registry: ToolRegistry, verify_ssl: bool) -> Result<()> {
    if !verify_ssl {
        tracing::warn!("starting MCP server with SSL verification DISABLED");
    }
    tracing::info!(tools = registry.len(), "starting zerobounce MCP server");

    let server = ZeroBounceServer::new(Arc::new(registry));
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
