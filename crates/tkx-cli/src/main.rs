//! 🚀 tkx-cli — the front door of the tunnel-key extractor.
//!
//! 🎬 *[narrator voice]* "It all started with a simple main() function..."
//! 📦 Thin wrapper: set up logging, find the config, run the extractor,
//! and turn any failure into a non-zero exit. The library does the rest. 🦆

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// 🚇 Print the label:port pairs and distinct ports of every tunnel in a site/datacenter document.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file. Skipped when it doesn't exist; env vars (TKX_*) and defaults still apply.
    #[arg(default_value = "tkx.toml")]
    config: PathBuf,
}

/// 🔧 Steps:
/// 1. Init tracing on stderr (stdout is spoken for)
/// 2. Parse args
/// 3. Load config
/// 4. Run the thing
/// 5. Report the error chain and exit 1 if anything went sideways
#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("💀 error: {}", err);
        // -- 🧅 peel the onion, one layer at a time
        for cause in err.chain().skip(1) {
            error!("⚠️  cause: {}", cause);
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // 🔒 A missing config file isn't an error: no file means env vars + defaults.
    let config_file = args.config.as_path();
    let config_file_if_it_exists = match config_file.try_exists().context(format!(
        "💀 Couldn't check whether the config file exists. Was checking here: '{}'",
        config_file.display()
    ))? {
        true => Some(config_file),
        false => None,
    };

    let app_config = tkx::app_config::load_config(config_file_if_it_exists)
        .context("💀 In tkx-cli, main, we couldn't load the config. Take a look at the file and any TKX_* env vars.")?;

    tkx::run(app_config).await?;
    Ok(())
}
