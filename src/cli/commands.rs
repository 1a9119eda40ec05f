//! CLI command implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::extract::extract_text;
use crate::pipeline::{output_path_for, Summarizer};
use crate::summary::render_summary;

/// Summarize a transcript file into a Word document
pub async fn summarize_file(
    settings: &Settings,
    file: &Path,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut summarizer = Summarizer::from_settings(settings)?;
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        summarizer = summarizer.with_output_dir(dir);
    }

    let outcome = summarizer.summarize_file(file).await;
    match outcome.path {
        Some(path) => {
            println!("{}", outcome.message);
            println!("{}", path.display());
            Ok(())
        }
        None => anyhow::bail!("{}", outcome.message),
    }
}

/// Print the extracted transcript text
pub fn extract_file(file: &Path) -> Result<()> {
    let text = extract_text(file)
        .with_context(|| format!("Failed to extract text from {}", file.display()))?;
    println!("{}", text);
    Ok(())
}

/// Render a saved model response without calling the model
pub fn render_file(summary: &Path, output: Option<PathBuf>) -> Result<()> {
    let text = std::fs::read_to_string(summary)
        .with_context(|| format!("Failed to read summary file: {}", summary.display()))?;

    let output = output.unwrap_or_else(|| {
        let dir = summary.parent().unwrap_or_else(|| Path::new("."));
        output_path_for(summary, dir)
    });

    let spec = render_summary(&text, &output)?;
    println!(
        "Rendered {} paragraphs and {} table(s) to: {}",
        spec.paragraphs().count(),
        spec.tables().count(),
        output.display()
    );
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            println!("{}", toml::to_string_pretty(&shown)?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
