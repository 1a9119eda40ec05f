//! sikum - Meeting transcript summaries
//!
//! Entry point for the sikum CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sikum::cli::{Cli, Commands};
use sikum::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up OPENAI_API_KEY and friends from a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A broken config file only matters to commands that read it.
    let settings = Settings::load();
    let default_level = match &settings {
        Ok(settings) => settings.log_filter(cli.verbose).to_string(),
        Err(_) if cli.verbose => "debug".to_string(),
        Err(_) => "info".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            sikum::cli::completions::print(shell);
        }
        Commands::Extract { file } => {
            sikum::cli::commands::extract_file(&file)?;
        }
        Commands::Render { summary, output } => {
            sikum::cli::commands::render_file(&summary, output)?;
        }
        command => {
            let settings = settings?;

            match command {
                Commands::Summarize { file, output_dir } => {
                    sikum::cli::commands::summarize_file(&settings, &file, output_dir).await?;
                }
                Commands::Config(config_cmd) => {
                    sikum::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Extract { .. } | Commands::Render { .. } => {
                    unreachable!()
                }
            }
        }
    }

    Ok(())
}
