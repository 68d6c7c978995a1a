// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use habitual_core::{APP_NAME, Habitual};
use tracing_subscriber::EnvFilter;

use crate::cmd_check::CmdCheck;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_routine::{
    CmdRoutineArrange, CmdRoutineDelete, CmdRoutineHide, CmdRoutineList, CmdRoutineMove,
    CmdRoutineNew, CmdRoutineRename, CmdRoutineUnhideAll,
};
use crate::cmd_task::{
    CmdTaskArrange, CmdTaskDelete, CmdTaskHide, CmdTaskList, CmdTaskMove, CmdTaskNew,
    CmdTaskRename, CmdTaskUnhideAll,
};
use crate::config::{Config, parse_config};
use crate::util::ArgOutputFormat;

/// Run the habitual command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::from_default_env().add_directive("habitual=warn".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Daily routines and habits, checked off one task at a time.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // default to the routine list
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/habitual/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/habitual/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                Command::new("routine")
                    .alias("r")
                    .about("Manage your routines")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdRoutineList::command())
                    .subcommand(CmdRoutineNew::command())
                    .subcommand(CmdRoutineRename::command())
                    .subcommand(CmdRoutineDelete::command())
                    .subcommand(CmdRoutineHide::command())
                    .subcommand(CmdRoutineUnhideAll::command())
                    .subcommand(CmdRoutineMove::command())
                    .subcommand(CmdRoutineArrange::command()),
            )
            .subcommand(
                Command::new("task")
                    .alias("t")
                    .about("Manage the tasks of a routine")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTaskList::command())
                    .subcommand(CmdTaskNew::command())
                    .subcommand(CmdTaskRename::command())
                    .subcommand(CmdTaskDelete::command())
                    .subcommand(CmdTaskHide::command())
                    .subcommand(CmdTaskUnhideAll::command())
                    .subcommand(CmdTaskMove::command())
                    .subcommand(CmdTaskArrange::command()),
            )
            .subcommand(CmdCheck::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("routine", matches)) => match matches.subcommand() {
                Some((CmdRoutineList::NAME, matches)) => RoutineList(CmdRoutineList::from(matches)),
                Some((CmdRoutineNew::NAME, matches)) => RoutineNew(CmdRoutineNew::from(matches)),
                Some((CmdRoutineRename::NAME, matches)) => {
                    RoutineRename(CmdRoutineRename::from(matches))
                }
                Some((CmdRoutineDelete::NAME, matches)) => {
                    RoutineDelete(CmdRoutineDelete::from(matches))
                }
                Some((CmdRoutineHide::NAME, matches)) => RoutineHide(CmdRoutineHide::from(matches)),
                Some((CmdRoutineUnhideAll::NAME, _)) => RoutineUnhideAll(CmdRoutineUnhideAll),
                Some((CmdRoutineMove::NAME, matches)) => RoutineMove(CmdRoutineMove::from(matches)),
                Some((CmdRoutineArrange::NAME, _)) => RoutineArrange(CmdRoutineArrange),
                _ => unreachable!(),
            },
            Some(("task", matches)) => match matches.subcommand() {
                Some((CmdTaskList::NAME, matches)) => TaskList(CmdTaskList::from(matches)),
                Some((CmdTaskNew::NAME, matches)) => TaskNew(CmdTaskNew::from(matches)),
                Some((CmdTaskRename::NAME, matches)) => TaskRename(CmdTaskRename::from(matches)),
                Some((CmdTaskDelete::NAME, matches)) => TaskDelete(CmdTaskDelete::from(matches)),
                Some((CmdTaskHide::NAME, matches)) => TaskHide(CmdTaskHide::from(matches)),
                Some((CmdTaskUnhideAll::NAME, matches)) => {
                    TaskUnhideAll(CmdTaskUnhideAll::from(matches))
                }
                Some((CmdTaskMove::NAME, matches)) => TaskMove(CmdTaskMove::from(matches)),
                Some((CmdTaskArrange::NAME, matches)) => TaskArrange(CmdTaskArrange::from(matches)),
                _ => unreachable!(),
            },
            Some((CmdCheck::NAME, matches)) => Check(CmdCheck::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => RoutineList(CmdRoutineList {
                output_format: ArgOutputFormat::Table,
            }),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List routines
    RoutineList(CmdRoutineList),

    /// Add a routine
    RoutineNew(CmdRoutineNew),

    /// Rename a routine
    RoutineRename(CmdRoutineRename),

    /// Delete a routine
    RoutineDelete(CmdRoutineDelete),

    /// Hide a routine for today
    RoutineHide(CmdRoutineHide),

    /// Unhide every routine
    RoutineUnhideAll(CmdRoutineUnhideAll),

    /// Move a routine
    RoutineMove(CmdRoutineMove),

    /// Reorder routines interactively
    RoutineArrange(CmdRoutineArrange),

    /// List the tasks of a routine
    TaskList(CmdTaskList),

    /// Add a task
    TaskNew(CmdTaskNew),

    /// Rename a task
    TaskRename(CmdTaskRename),

    /// Delete a task
    TaskDelete(CmdTaskDelete),

    /// Hide a task for today
    TaskHide(CmdTaskHide),

    /// Unhide every task of a routine
    TaskUnhideAll(CmdTaskUnhideAll),

    /// Move a task
    TaskMove(CmdTaskMove),

    /// Reorder the tasks of a routine interactively
    TaskArrange(CmdTaskArrange),

    /// Record the completion of a task
    Check(CmdCheck),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            RoutineList(a)      => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineNew(a)       => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineRename(a)    => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineDelete(a)    => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineHide(a)      => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineUnhideAll(a) => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineMove(a)      => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoutineArrange(a)   => Self::run_with(config, |x, c| a.run(x, c.arrange).boxed_local()).await,
            TaskList(a)         => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskNew(a)          => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskRename(a)       => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskDelete(a)       => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskHide(a)         => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskUnhideAll(a)    => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskMove(a)         => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            TaskArrange(a)      => Self::run_with(config, |x, c| a.run(x, c.arrange).boxed_local()).await,
            Check(a)            => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    /// The arrange screen keeps its drag engine on this thread, hence the
    /// local future.
    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Habitual, Config) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, config) = parse_config(config).await?;
        let mut habitual = Habitual::new(core_config).await?;

        f(&mut habitual, config).await?;

        habitual.close().await?;
        Ok(())
    }
}
