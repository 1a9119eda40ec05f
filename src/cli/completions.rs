//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;

/// Write the completion script for `shell` into `out`.
pub fn write(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

/// Print completion script for the requested shell to stdout.
pub fn print(shell: Shell) {
    write(shell, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zsh_script_lists_subcommands() {
        let mut out = Vec::new();
        write(Shell::Zsh, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("sikum"));
        assert!(script.contains("summarize"));
        assert!(script.contains("render"));
    }
}
