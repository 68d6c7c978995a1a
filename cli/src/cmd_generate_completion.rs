// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs::File, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueEnum, ValueHint, arg, value_parser};
use clap_complete::{Generator, generate};

use crate::Cli;

/// Prints or installs the completion script of `habitual` for one shell.
#[derive(Debug, Clone)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,

    /// Written to stdout when unset.
    pub output: Option<PathBuf>,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Generate the completion script for a shell")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Shell to complete in").value_parser(value_parser!(Shell)))
            .arg(
                arg!(-o --output <FILE> "Write the script to FILE instead of stdout")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            shell: matches.get_one::<Shell>("shell").copied().unwrap_or(Shell::Bash),
            output: matches.get_one::<PathBuf>("output").cloned(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        match &self.output {
            Some(path) => {
                let mut file = File::create(path)
                    .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
                self.shell.write_script(&mut file);
                println!("Wrote {} completion to {}", self.shell.name(), path.display());
            }
            None => self.shell.write_script(&mut io::stdout()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    /// Name as typed on the command line.
    fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }

    pub fn write_script(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as Builtin;

        match self {
            Shell::Bash => emit(Builtin::Bash, buf),
            Shell::Elvish => emit(Builtin::Elvish, buf),
            Shell::Fish => emit(Builtin::Fish, buf),
            Shell::PowerShell => emit(Builtin::PowerShell, buf),
            Shell::Zsh => emit(Builtin::Zsh, buf),
            Shell::Nushell => emit(clap_complete_nushell::Nushell {}, buf),
        }
    }
}

fn emit(generator: impl Generator, buf: &mut impl io::Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(generator, &mut cmd, bin, buf);
}
