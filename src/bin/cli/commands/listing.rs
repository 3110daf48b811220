use clap::{Args, Subcommand};
use marketplace::dto::ListingDto;

use crate::client::MarketplaceClient;
use crate::output::{self, OutputConfig};

/// Product fields; omitted flags are left out of the request body
#[derive(Args, Debug, Default)]
pub struct ListingFields {
    #[clap(long)]
    pub product_name: Option<String>,
    #[clap(long)]
    pub product_category: Option<String>,
    #[clap(long)]
    pub product_description: Option<String>,
    #[clap(long)]
    pub product_quantity: Option<String>,
    #[clap(long)]
    pub product_price: Option<String>,
    #[clap(long)]
    pub country: Option<String>,
    #[clap(long)]
    pub market_name: Option<String>,
}

impl From<ListingFields> for ListingDto {
    fn from(fields: ListingFields) -> Self {
        ListingDto {
            product_name: fields.product_name,
            product_category: fields.product_category,
            product_description: fields.product_description,
            product_quantity: fields.product_quantity,
            product_price: fields.product_price,
            country: fields.country,
            market_name: fields.market_name,
        }
    }
}

/// Listing commands; all of them need a token
#[derive(Subcommand, Debug)]
pub enum ListingCommands {
    /// List all listings
    List,
    /// Show a single listing
    Get {
        /// The listing ID
        id: i32,
    },
    /// Show the first listing owned by a user
    ForUser {
        /// The user ID
        user_id: i32,
    },
    /// Create a listing owned by a user
    Create {
        /// The owning user's ID
        user_id: i32,
        #[clap(flatten)]
        fields: ListingFields,
    },
    /// Replace some fields of a listing
    Update {
        /// The listing ID
        id: i32,
        #[clap(flatten)]
        fields: ListingFields,
    },
}

/// Executes a listing command
pub async fn execute(
    client: &MarketplaceClient,
    cmd: ListingCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ListingCommands::List => {
            let listings = client.list_listings().await?;
            output::print_listings(&listings, config);
        }
        ListingCommands::Get { id } => {
            let listing = client.get_listing(id).await?;
            output::print_listing(&listing, config);
        }
        ListingCommands::ForUser { user_id } => {
            let listing = client.get_listing_for_user(user_id).await?;
            output::print_listing(&listing, config);
        }
        ListingCommands::Create { user_id, fields } => {
            let listing = client.create_listing(user_id, &fields.into()).await?;
            output::print_listing(&listing, config);
        }
        ListingCommands::Update { id, fields } => {
            let listing = client.update_listing(id, &fields.into()).await?;
            output::print_listing(&listing, config);
        }
    }
    Ok(())
}
