use clap::ValueEnum;
use marketplace::models::{Listing, User};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or tokens)
    pub quiet: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render JSON: {}", e),
    }
}

/// Prints a list of users in the specified format
pub fn print_users(users: &[User], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if users.is_empty() {
                if !config.quiet {
                    println!("No users found.");
                }
                return;
            }
            if config.quiet {
                for user in users {
                    println!("{}", user.get_id());
                }
                return;
            }
            println!("{:>4}  USERNAME", "ID");
            for user in users {
                println!("{:>4}  {}", user.get_id(), user.get_username());
            }
        }
        OutputFormat::Json => print_json(users),
    }
}

/// Prints a single user in the specified format
pub fn print_user(user: &User, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", user.get_id());
                return;
            }
            println!("ID:       {}", user.get_id());
            println!("Username: {}", user.get_username());
        }
        OutputFormat::Json => print_json(user),
    }
}

/// Prints a list of listings in the specified format
pub fn print_listings(listings: &[Listing], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                if !config.quiet {
                    println!("No listings found.");
                }
                return;
            }
            if config.quiet {
                for listing in listings {
                    println!("{}", listing.id);
                }
                return;
            }
            let name_w = listings
                .iter()
                .map(|l| l.product_name.chars().count())
                .max()
                .unwrap_or(4)
                .max(4);
            let market_w = listings
                .iter()
                .map(|l| l.market_name.chars().count())
                .max()
                .unwrap_or(6)
                .max(6);
            println!(
                "{:>4}  {:>5}  {:<name_w$}  {:<market_w$}  PRICE",
                "ID",
                "OWNER",
                "NAME",
                "MARKET",
                name_w = name_w,
                market_w = market_w,
            );
            for listing in listings {
                println!(
                    "{:>4}  {:>5}  {:<name_w$}  {:<market_w$}  {}",
                    listing.id,
                    listing.user_id,
                    listing.product_name,
                    listing.market_name,
                    listing.product_price,
                    name_w = name_w,
                    market_w = market_w,
                );
            }
        }
        OutputFormat::Json => print_json(listings),
    }
}

/// Prints a single listing in the specified format
pub fn print_listing(listing: &Listing, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", listing.id);
                return;
            }
            println!("ID:          {}", listing.id);
            println!("Owner:       {}", listing.user_id);
            println!("Name:        {}", listing.product_name);
            println!("Category:    {}", listing.product_category);
            println!("Description: {}", listing.product_description);
            println!("Quantity:    {}", listing.product_quantity);
            println!("Price:       {}", listing.product_price);
            println!("Market:      {}, {}", listing.market_name, listing.country);
        }
        OutputFormat::Json => print_json(listing),
    }
}

/// Prints a login token; quiet mode prints the bare token for scripting
pub fn print_token(message: &str, token: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", token);
                return;
            }
            println!("{}", message);
            println!("Token: {}", token);
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "message": message, "token": token })),
    }
}

/// Prints a success message
pub fn print_success(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "message": message })),
    }
}
