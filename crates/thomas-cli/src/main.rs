mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use thomas_core::{Chatbot, Context};
use thomas_nlp::EnglishNormalizer;

use config::ThomasAppConfig;

/// Interactive terminal prompt from spec §6's CLI/embedding boundary:
/// reads a line, calls `respond`, prints the tokens space-joined, updates
/// the context, and on the sentinel line `"s"` prompts to save.
#[derive(Debug, Parser)]
#[command(name = "thomas", version, about = "Thomas: a self-learning conversational agent")]
struct Cli {
    /// Path to a TOML config file. Created with defaults if absent, and
    /// rewritten with any `--storage-path` override so it persists across
    /// runs.
    #[arg(long, default_value = "thomas.toml")]
    config: PathBuf,
    /// Overrides the storage directory from the config file.
    #[arg(long)]
    storage_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let mut app_config = ThomasAppConfig::load_from(&cli.config).unwrap_or_default();
    if let Some(storage_path) = cli.storage_path {
        app_config.storage.path = storage_path;
    }
    app_config
        .save_to(&cli.config)
        .context("failed to persist thomas' config")?;

    let mut bot = Chatbot::new(app_config.into(), EnglishNormalizer)
        .context("failed to load thomas' brain from storage")?;

    println!("Thomas learns as you speak to him.");
    println!("Save his brain by typing 's'.\n");

    let mut ctx = Context::new();
    let stdin = io::stdin();

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "s" {
            if confirm("Are you sure you want to save the new brain?")? {
                bot.save_data().context("failed to save thomas' brain")?;
                println!("Saving data...");
                return Ok(());
            }
            continue;
        }

        match bot.respond(&ctx, line) {
            Ok(response) => {
                ctx.save(&response);
                println!("Thomas: {response}");
            }
            Err(err) => {
                eprintln!("Thomas has nothing to say yet: {err}");
            }
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
