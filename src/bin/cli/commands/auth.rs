use clap::Args;

use crate::client::MarketplaceClient;
use crate::output::{self, OutputConfig};

/// Username and password flags shared by `register` and `login`
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// The username
    #[clap(long)]
    pub username: String,
    /// The password
    #[clap(long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Prints the server's liveness message
pub async fn status(client: &MarketplaceClient, config: &OutputConfig) -> Result<(), Box<dyn std::error::Error>> {
    let message = client.status().await?;
    output::print_success(&message, config);
    Ok(())
}

/// Lists all users
pub async fn users(client: &MarketplaceClient, config: &OutputConfig) -> Result<(), Box<dyn std::error::Error>> {
    let users = client.list_users().await?;
    output::print_users(&users, config);
    Ok(())
}

/// Registers a new user
pub async fn register(
    client: &MarketplaceClient,
    args: CredentialArgs,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = client.register(args.username, args.password).await?;
    output::print_user(&user, config);
    Ok(())
}

/// Logs in and prints the token
pub async fn login(
    client: &MarketplaceClient,
    args: CredentialArgs,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client.login(args.username, args.password).await?;
    output::print_token(&response.message, &response.token, config);
    Ok(())
}
