use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use stroke_sync::{
    config::Config,
    processing::{AlignmentJob, ProcessingClient},
};

#[derive(Parser)]
#[command(
    name = "stroke-sync",
    version,
    about = "Submit an aligned tennis swing clip for side-by-side rendering",
    long_about = "Stroke-Sync aligns a swing clip against a canonical reference clip around the ball-contact instant. This binary submits a finalized alignment to the offline compositing backend."
)]
struct Cli {
    /// Swing clip to submit
    #[arg(short, long)]
    video: PathBuf,

    /// Ball-contact instant in the clip, in seconds
    #[arg(short = 't', long)]
    contact: f64,

    /// Processing endpoint (overrides the configured one)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting Stroke-Sync v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    if !cli.contact.is_finite() || cli.contact < 0.0 {
        anyhow::bail!("Contact instant must be a non-negative number of seconds");
    }

    let endpoint = cli.endpoint.unwrap_or(config.processing.endpoint);
    let client = ProcessingClient::new(&endpoint)?;

    let job = AlignmentJob::new(&cli.video, cli.contact);
    info!("Video: {:?}", cli.video);
    info!("Contact: {}s", job.timestamp_field());
    info!("Endpoint: {}", client.endpoint());

    let receipt = client.submit(&job).await?;

    info!("🎉 Composited output ready at: {}", receipt.output_file_path);
    Ok(())
}
