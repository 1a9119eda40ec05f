//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// sikum - Meeting transcript summaries as right-to-left Word documents
#[derive(Parser, Debug)]
#[command(name = "sikum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a transcript (.txt, .docx, .pdf) into a Word document
    Summarize {
        /// Transcript file
        file: PathBuf,

        /// Directory for the generated document (defaults to config or temp dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the text extracted from a transcript file
    Extract {
        /// Transcript file
        file: PathBuf,
    },

    /// Render a saved model response into a Word document
    Render {
        /// Text file holding the model response
        summary: PathBuf,

        /// Output document path (defaults to <name>_SUMMARY.docx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
