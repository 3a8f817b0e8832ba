use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use std::path::PathBuf;

use photo_organizer_core::{audit, logging, Config, PhotoOrganizer, RunMode};

#[derive(Parser)]
#[command(name = "photo-organizer")]
#[command(about = "Organize photos into date/device folders, skipping duplicates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move files from a source tree into a new destination root
    Move {
        /// Directory to organize
        source: PathBuf,

        /// Root the date/device folders are created under
        destination: PathBuf,

        #[command(flatten)]
        opts: RunOpts,
    },

    /// Reorganize files in place under the source root
    Reorganize {
        /// Directory to organize
        source: PathBuf,

        #[command(flatten)]
        opts: RunOpts,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "photo-organizer.json")]
        path: PathBuf,
    },
}

#[derive(Args)]
struct RunOpts {
    /// Run without making changes
    #[arg(long)]
    dry_run: bool,

    /// Where to write the audit log (defaults to a timestamped file)
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Classify from filesystem timestamps only, without exiftool
    #[arg(long)]
    no_exiftool: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Move {
            source,
            destination,
            opts,
        } => organize(source, Some(destination), opts),

        Commands::Reorganize { source, opts } => organize(source, None, opts),

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn organize(
    source: PathBuf,
    destination: Option<PathBuf>,
    opts: RunOpts,
) -> Result<(), anyhow::Error> {
    // Set up configuration
    let mut config = if let Some(config_path) = &opts.config {
        // Load config from file
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    // Override config with command line arguments
    if opts.dry_run {
        config.dry_run = true;
    }
    if opts.no_exiftool {
        config.use_exiftool = false;
    }
    if let Some(path) = opts.audit_log {
        config.audit_log = Some(path);
    }
    if config.audit_log.is_none() {
        config.audit_log = Some(audit::default_log_path());
    }

    // Validate configuration
    config.validate()?;

    // Set log level based on verbosity
    let level = match opts.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    logging::init_logger(&config.log_dir, level).map_err(|e| anyhow::anyhow!("{}", e))?;

    if !source.is_dir() {
        anyhow::bail!("Source directory does not exist: {}", source.display());
    }

    let mode = match destination {
        Some(dest) => RunMode::MoveTo(dest),
        None => RunMode::InPlace,
    };
    let audit_path = config.audit_log.clone();

    // Initialize organizer and run
    let organizer = PhotoOrganizer::from_config(config);
    info!("Starting photo organization...");
    let summary = organizer.run(&source, &mode)?;

    println!("\nDone! {}", summary);
    if let Some(path) = audit_path {
        println!("Audit log saved to {}", path.display());
    }

    Ok(())
}
