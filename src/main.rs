// Secret Dotenv - fetch a secret from AWS Secrets Manager into a dotenv file
//
// This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::Parser;
use secret_dotenv::cloud::aws::get_secret;
use secret_dotenv::config::Settings;
use secret_dotenv::dotenv::save_secret;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Secret Dotenv - write an AWS Secrets Manager secret to a dotenv file
#[derive(Parser, Debug)]
#[command(name = "secret-dotenv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch a secret from AWS Secrets Manager and save it as KEY=value lines", long_about = None)]
struct Cli {
    /// Name or ARN of the secret (default: backend-env)
    #[arg(short, long)]
    secret_id: Option<String>,

    /// AWS region of the secret (default: us-east-2)
    #[arg(short, long)]
    region: Option<String>,

    /// Output file path (default: /mnt/.env)
    #[arg(short, long)]
    output: Option<String>,

    /// Optional YAML file with secret_id, region and output
    #[arg(short, long)]
    config: Option<String>,

    /// Fetch the secret and list the keys that would be written
    #[arg(long, default_value = "false")]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load config from: {}", path))?,
        None => Settings::default(),
    };

    let settings = settings.with_overrides(
        cli.secret_id.clone(),
        cli.region.clone(),
        cli.output.clone(),
    );

    settings
        .validate()
        .with_context(|| "Configuration validation failed")?;

    Ok(settings)
}

fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(&cli)?;
    let output_path = settings.output_path()?;

    debug!(?settings, "Resolved settings");
    info!(
        secret_id = %settings.secret_id,
        region = %settings.region,
        "Fetching secret from AWS Secrets Manager"
    );

    // The SDK is async; block on it from a single-threaded runtime.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let secret = runtime.block_on(get_secret(&settings.secret_id, &settings.region))?;

    let mut stdout = std::io::stdout();
    let keys = save_secret(&secret, &output_path, cli.dry_run, &mut stdout)
        .with_context(|| format!("Failed to save secret '{}'", settings.secret_id))?;

    if cli.dry_run {
        return Ok(());
    }

    info!(keys, "Wrote dotenv file");
    println!("Secret saved to {}", output_path.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
