mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "phenotypes")]
#[command(version, about = "Phenotype trait file validation and import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a traits file without writing anything
    Validate {
        /// Path to the traits file (.tsv, .csv or .txt)
        file: String,

        /// Genus the traits belong to
        #[arg(short, long)]
        genus: String,

        /// Project the upload is attached to
        #[arg(short, long)]
        project: Option<u64>,

        /// Path to the importer configuration (YAML or TOML)
        #[arg(short, long)]
        config: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a traits file and import its traits
    Import {
        /// Path to the traits file (.tsv, .csv or .txt)
        file: String,

        /// Genus the traits belong to
        #[arg(short, long)]
        genus: String,

        /// Project the upload is attached to
        #[arg(short, long)]
        project: Option<u64>,

        /// Path to the importer configuration (YAML or TOML)
        #[arg(short, long)]
        config: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check an importer configuration without reading any file
    Check {
        /// Path to the importer configuration (YAML or TOML)
        config: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            file,
            genus,
            project,
            config,
            format,
        } => commands::validate::execute(&file, &genus, project, &config, &format),

        Commands::Import {
            file,
            genus,
            project,
            config,
            format,
        } => commands::import::execute(&file, &genus, project, &config, &format),

        Commands::Check { config, format } => commands::check::execute(&config, &format),
    }
}
