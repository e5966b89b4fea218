// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "photobooth")]
#[command(about = "Photobooth: timed capture, filters and photo strips")]
#[command(version = env!("PHOTOBOOTH_BUILD_VERSION"))]
struct Cli {
    /// Config file (default: <config dir>/photobooth/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a session from the virtual camera and hand the photos off
    Shoot {
        /// Photos to take (1-8)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Countdown seconds before each photo
        #[arg(short, long)]
        timer: Option<u32>,

        /// Filter name (see 'photobooth filters')
        #[arg(short, long)]
        filter: Option<String>,

        /// Do not mirror captured photos
        #[arg(long)]
        no_mirror: bool,

        /// Image file served as the camera feed (default: test pattern)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Photo indices to hand off, in order (default: all)
        #[arg(long, value_delimiter = ',')]
        select: Vec<usize>,
    },

    /// Compose the handed-off photos into a strip and save it as PNG
    Compose {
        /// Background color (#RGB or #RRGGBB)
        #[arg(short, long)]
        background: Option<String>,

        /// Template: Default, Film, Hearts, Cute, Futuristic, Beach
        #[arg(long)]
        template: Option<String>,

        /// Caption, at most 100 characters
        #[arg(short, long)]
        caption: Option<String>,

        /// Caption and date color (#RGB or #RRGGBB)
        #[arg(long)]
        font_color: Option<String>,

        /// Stamp today's date
        #[arg(short, long)]
        date: bool,

        /// Round photo corners
        #[arg(short, long)]
        rounded: bool,

        /// Output directory (default: ~/Pictures/photobooth)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Play the confetti run after saving
        #[arg(long)]
        confetti: bool,
    },

    /// List available filters
    Filters,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photobooth=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => photobooth::Config::load_from(path),
        None => photobooth::Config::load(),
    };

    match cli.command {
        Commands::Shoot {
            limit,
            timer,
            filter,
            no_mirror,
            source,
            select,
        } => cli::shoot(
            config,
            cli::ShootOptions {
                limit,
                timer,
                filter,
                no_mirror,
                source,
                select,
            },
        ),
        Commands::Compose {
            background,
            template,
            caption,
            font_color,
            date,
            rounded,
            output,
            confetti,
        } => cli::compose(
            config,
            cli::ComposeOptions {
                background,
                template,
                caption,
                font_color,
                date,
                rounded,
                output,
                confetti,
            },
        ),
        Commands::Filters => cli::list_filters(),
    }
}
