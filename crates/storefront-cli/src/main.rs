use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_core::session::Feature;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront CLI - inspect and drive the persisted user session", long_about = None)]
struct Cli {
    /// Keep config and storage under this directory instead of the user profile
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Explicit config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current session and both predicates
    Status,
    /// Save a session for an OTP-verified user
    Login {
        #[arg(long)]
        id: String,
        #[arg(long)]
        mobile: String,
        #[arg(long = "type")]
        user_type: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Continue as guest
    Guest,
    /// Complete the profile step for the current session
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        secondary_mobile: Option<String>,
    },
    /// Remove the session
    Logout,
    /// Show whether a screen is available to the current session
    Gate {
        /// vendor_contact, professional_contact, enquiry_submission, profile or logout
        feature: Feature,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app = bootstrap::AppBootstrap::initialize(cli.data_dir, cli.config).await?;
    let store = &app.session_store;

    match cli.command {
        Commands::Status => commands::session::status(store)?,
        Commands::Login {
            id,
            mobile,
            user_type,
            name,
            email,
        } => commands::session::login(store, id, mobile, user_type, name, email).await?,
        Commands::Guest => commands::session::guest(store).await?,
        Commands::Register {
            name,
            email,
            city,
            location,
            secondary_mobile,
        } => {
            commands::session::register(store, name, email, city, location, secondary_mobile)
                .await?
        }
        Commands::Logout => commands::session::logout(store).await?,
        Commands::Gate { feature } => commands::session::gate(store, feature)?,
    }

    app.shutdown();
    Ok(())
}
