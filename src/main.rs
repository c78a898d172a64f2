//! CLI entry point for nexa-site

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nexa-site")]
#[command(version)]
#[command(about = "Marketing site for Nexa Creative Solutions, backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Serve content from a JSON fixture instead of the CMS
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Read content from a JSON fixture instead of the CMS
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// List CMS content
    List {
        /// Type of content to list (post, image)
        #[arg(default_value = "post")]
        r#type: String,

        /// Read content from a JSON fixture instead of the CMS
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "nexa_site=debug,info"
    } else {
        "nexa_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip, fixture } => {
            let site = nexa_site::Site::new(&base_dir)?;
            let client = site.client(fixture.as_deref())?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            nexa_site::server::start(&site, client, &ip, port).await?;
        }

        Commands::Generate { fixture } => {
            let site = nexa_site::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate(fixture.as_deref()).await?;
            println!("Generated successfully!");
        }

        Commands::List { r#type, fixture } => {
            let site = nexa_site::Site::new(&base_dir)?;
            nexa_site::commands::list::run(&site, &r#type, fixture.as_deref()).await?;
        }

        Commands::Clean => {
            let site = nexa_site::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("nexa-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
