//! # Cartell CLI
//!
//! Command-line interface for the poster generator.
//!
//! ## Usage
//!
//! ```bash
//! # Start the webhook server
//! cartell serve --listen 0.0.0.0:8080 --secret topsecret
//!
//! # Render a poster from the command line with a local photograph
//! cartell render --title "El silenci" --guest "Jordi Puig" \
//!     --date 2024-03-14 --time 20:00 --event-type Cena \
//!     --photo guest.png
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cartell::{
    CartellError,
    compose::{self, Assets},
    poster::{Poster, default_venues},
    server::{ServerConfig, serve},
};

/// Cartell - event poster generator
#[derive(Parser, Debug)]
#[command(name = "cartell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Webhook signing secret (falls back to SECRET_TOKEN; empty disables verification)
        #[arg(long)]
        secret: Option<String>,

        /// Output PNG path
        #[arg(long, default_value = "cartel.png")]
        output: PathBuf,
    },
    /// Render a poster using a local photograph
    Render {
        /// Event title
        #[arg(long)]
        title: String,

        /// Guest name
        #[arg(long)]
        guest: String,

        /// Event date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Display time (e.g. "20:00")
        #[arg(long)]
        time: String,

        /// Event category key (e.g. "Cena")
        #[arg(long, default_value = "")]
        event_type: String,

        /// Path to the photograph (left in place)
        #[arg(long)]
        photo: PathBuf,

        /// Output PNG path
        #[arg(long, default_value = "cartel.png")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CartellError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            secret,
            output,
        } => {
            let secret = secret.or_else(|| std::env::var("SECRET_TOKEN").ok());
            let config = ServerConfig {
                listen_addr: listen,
                secret,
                assets: Assets {
                    output,
                    ..Assets::default()
                },
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config))
        }
        Commands::Render {
            title,
            guest,
            date,
            time,
            event_type,
            photo,
            output,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| CartellError::Webhook(format!("bad date {:?}: {}", date, e)))?;

            let poster = Poster {
                title,
                guest,
                date,
                time,
                pic_url: String::new(),
                event_type,
            };

            let assets = Assets {
                output: output.clone(),
                ..Assets::default()
            };
            compose::render(&poster, &photo, &assets, &default_venues())?;

            println!("Saved to {}", output.display());
            Ok(())
        }
    }
}
