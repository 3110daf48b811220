mod client;
mod commands;
mod output;

use clap::{Parser, Subcommand};
use client::MarketplaceClient;
use commands::auth::CredentialArgs;
use marketplace::config;
use output::{OutputConfig, OutputFormat};
use std::process;

/// CLI for the marketplace listings API
#[derive(Parser, Debug)]
#[clap(name = "marketplace-cli", about = "CLI for the marketplace listings API")]
struct Cli {
    /// Server URL to connect to
    #[clap(long, env = "MARKETPLACE_URL", global = true)]
    server_url: Option<String>,

    /// Token from `login`, sent with listing commands
    #[clap(long, env = "MARKETPLACE_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just IDs or the token)
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the server is up
    Status,
    /// List registered users
    Users,
    /// Register a new user
    Register(CredentialArgs),
    /// Log in and print a token
    Login(CredentialArgs),
    /// Manage listings (token required)
    #[command(subcommand)]
    Listing(commands::listing::ListingCommands),
}

/// Resolves the server URL from CLI args, config file, or defaults
///
/// Precedence: CLI flag / env var > config file host and port > default
fn resolve_server_url(cli_url: Option<String>) -> String {
    if let Some(url) = cli_url {
        return url;
    }

    let config_dir = config::config_dir_path();
    let update = config_dir
        .map(|dir| dir.join(config::CONFIG_FILE_NAME))
        .and_then(|path| config::config_from_file(Some(path)).ok())
        .unwrap_or_default();

    config::base_config(None).apply_update(update).server_url()
}

/// Formats an error for human-readable stderr output
fn format_error(err: &dyn std::error::Error) -> String {
    let err_string = err.to_string();

    // reqwest only says "error sending request"; the cause is further down
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_string = cause.to_string();
        if cause_string.contains("Connection refused") || cause_string.contains("tcp connect error") {
            return format!(
                "Could not connect to server. Is marketplace running?\n  {}",
                err_string
            );
        }
        source = cause.source();
    }

    // ClientError::Server already formats as "Server error (STATUS): message"
    err_string
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let server_url = resolve_server_url(cli.server_url);
    let client = MarketplaceClient::new(server_url, cli.token);
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Status => commands::auth::status(&client, &output_config).await,
        Commands::Users => commands::auth::users(&client, &output_config).await,
        Commands::Register(args) => commands::auth::register(&client, args, &output_config).await,
        Commands::Login(args) => commands::auth::login(&client, args, &output_config).await,
        Commands::Listing(cmd) => commands::listing::execute(&client, cmd, &output_config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error(e.as_ref()));
        process::exit(1);
    }
}
