//! Completions command - Shell completion scripts for `waypoint`
//!
//! Scripts come straight from `clap_complete`; `--instructions` prints where
//! to put the script for the chosen shell instead.

use std::io;

use clap::Command;
use clap_complete::Shell;
use colored::Colorize;
use serde::Serialize;

use crate::output::{CsvOutput, Output, OutputConfig, Outputter, TableOutput};

const BIN_NAME: &str = "waypoint";

/// Where a shell expects its completion script, and how to install it there.
#[derive(Debug, Serialize, PartialEq)]
pub struct Installation {
    pub shell: String,
    /// File the script ends up in or is sourced from.
    pub target: String,
    /// One-liner that installs the script.
    pub command: String,
}

impl Installation {
    pub fn for_shell(shell: Shell) -> Self {
        let script = format!("{} completions {}", BIN_NAME, shell);
        let (target, command) = match shell {
            Shell::Bash => {
                let target = format!("~/.local/share/bash-completion/completions/{}", BIN_NAME);
                let command = format!("{} > {}", script, target);
                (target, command)
            }
            Shell::Zsh => {
                let target = format!("~/.zfunc/_{}", BIN_NAME);
                let command = format!("{} > {}  # ~/.zfunc must be in fpath", script, target);
                (target, command)
            }
            Shell::Fish => {
                let target = format!("~/.config/fish/completions/{}.fish", BIN_NAME);
                let command = format!("{} > {}", script, target);
                (target, command)
            }
            Shell::PowerShell => (
                "$PROFILE".to_string(),
                format!("Add-Content $PROFILE '{} | Out-String | Invoke-Expression'", script),
            ),
            Shell::Elvish => (
                "~/.config/elvish/rc.elv".to_string(),
                format!("echo 'eval ({} | slurp)' >> ~/.config/elvish/rc.elv", script),
            ),
            _ => (
                "-".to_string(),
                format!("{} > <completion dir of your shell>", script),
            ),
        };
        Self {
            shell: shell.to_string(),
            target,
            command,
        }
    }
}

impl Outputter for Installation {
    fn to_table(&self, config: &OutputConfig) -> String {
        let pairs = vec![
            ("Target", self.target.clone()),
            ("Install", self.command.clone()),
        ];
        format!(
            "{} completions for {}\n{}",
            "Waypoint".cyan().bold(),
            self.shell.yellow(),
            TableOutput::format_key_value(&pairs, config)
        )
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        CsvOutput::from_rows(
            &["shell", "target", "command"],
            &[vec![
                self.shell.clone(),
                self.target.clone(),
                self.command.clone(),
            ]],
        )
    }
}

/// Write the completion script for `shell` to stdout.
pub fn generate(shell: Shell, cmd: &mut Command) {
    clap_complete::generate(shell, cmd, BIN_NAME, &mut io::stdout());
}

/// Print where and how to install the script for `shell`.
pub fn run_instructions(shell: Shell, config: OutputConfig) -> anyhow::Result<()> {
    Output::new(Installation::for_shell(shell), config).render()
}
