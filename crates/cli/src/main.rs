//! Fitify CLI: the main entry point.
//!
//! Commands:
//! - `onboard`  Initialize config and data directories
//! - `status`   Show configuration and wardrobe counts
//! - `items`    List, add, remove or photo-identify clothing
//! - `laundry`  Show the wash or advance it by one refresh
//! - `outfit`   Suggest an outfit and refine it interactively
//! - `history`  Show accepted outfits
//! - `gateway`  Start the HTTP API server

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fitify",
    about = "Fitify: weather-aware outfit planner",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and data directories
    Onboard,

    /// Show configuration and wardrobe status
    Status,

    /// Manage wardrobe items
    Items {
        #[command(subcommand)]
        action: ItemsAction,
    },

    /// Inspect or advance the laundry
    Laundry {
        #[command(subcommand)]
        action: LaundryAction,
    },

    /// Suggest today's outfit and refine it slot by slot
    Outfit {
        /// Weather location, e.g. "Chicago, US"
        #[arg(short, long)]
        location: Option<String>,

        /// casual or formal (default: from the calendar, else casual)
        #[arg(short, long)]
        formality: Option<String>,

        /// What the day holds, e.g. school, work, hiking
        #[arg(short, long)]
        activity: Option<String>,
    },

    /// Show accepted outfits, newest first
    History {
        #[arg(short = 'n', long, default_value_t = fitify_wardrobe::DEFAULT_RECENT)]
        limit: usize,
    },

    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum ItemsAction {
    /// List items available to wear
    List,

    /// Add an item from a description
    Add {
        /// Garment type, e.g. t-shirt, jeans, sneakers
        #[arg(long = "type")]
        item_type: String,

        /// Material or cut, e.g. denim, cotton
        #[arg(long, default_value = "")]
        form: String,

        #[arg(long, default_value = "")]
        color: String,

        /// Weather the item suits (repeatable)
        #[arg(long = "weather")]
        weather: Vec<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Remove an item by id
    Remove { id: String },

    /// Classify a photo and add the item it shows
    Identify { image: std::path::PathBuf },
}

#[derive(Subcommand)]
enum LaundryAction {
    /// List items in the wash
    List,

    /// Advance the laundry by one refresh
    Tick,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Items { action } => match action {
            ItemsAction::List => commands::items::list().await?,
            ItemsAction::Add {
                item_type,
                form,
                color,
                weather,
                notes,
            } => commands::items::add(item_type, form, color, weather, notes).await?,
            ItemsAction::Remove { id } => commands::items::remove(&id).await?,
            ItemsAction::Identify { image } => commands::items::identify(&image).await?,
        },
        Commands::Laundry { action } => match action {
            LaundryAction::List => commands::laundry::list().await?,
            LaundryAction::Tick => commands::laundry::tick().await?,
        },
        Commands::Outfit {
            location,
            formality,
            activity,
        } => commands::outfit::run(location, formality, activity).await?,
        Commands::History { limit } => commands::history::run(limit).await?,
        Commands::Gateway { port } => commands::gateway::run(port).await?,
    }

    Ok(())
}
