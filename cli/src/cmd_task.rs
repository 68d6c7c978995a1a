// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use habitual_core::{Habitual, Task};
use habitual_dnd::DragConfig;

use crate::task_formatter::{TaskFormatter, TaskRow};
use crate::tui::{self, ArrangeTarget};
use crate::util::{
    ArgOutputFormat, arg_id, arg_index, arg_name, get_id, get_index, get_name,
};

#[derive(Debug, Clone, Copy)]
pub struct CmdTaskList {
    pub routine_id: i64,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the tasks of a routine shown today, with the last week")
            .arg(arg_id("routine", "Id of the routine"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            routine_id: get_id(matches, "routine"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing tasks...");
        habitual.get_routine(self.routine_id).await?;
        let tasks = habitual.list_tasks(self.routine_id).await?;
        print_tasks(habitual, tasks, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskNew {
    pub routine_id: i64,
    pub name: String,
}

impl CmdTaskNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a task at the end of a routine")
            .arg(arg_id("routine", "Id of the routine"))
            .arg(arg_name("Name of the task"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            routine_id: get_id(matches, "routine"),
            name: get_name(matches),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding task...");
        let task = habitual.new_task(self.routine_id, &self.name).await?;
        println!("Added task {}: {}", task.id, task.name);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskRename {
    pub id: i64,
    pub name: String,
}

impl CmdTaskRename {
    pub const NAME: &str = "rename";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Rename a task")
            .arg(arg_id("id", "Id of the task"))
            .arg(arg_name("New name of the task"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches, "id"),
            name: get_name(matches),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "renaming task...");
        let task = habitual.rename_task(self.id, &self.name).await?;
        println!("Renamed task {}: {}", task.id, task.name);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdTaskDelete {
    pub id: i64,
}

impl CmdTaskDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a task and its history")
            .arg(arg_id("id", "Id of the task"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches, "id"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting task...");
        habitual.delete_task(self.id).await?;
        println!("Deleted task {}", self.id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdTaskHide {
    pub id: i64,
}

impl CmdTaskHide {
    pub const NAME: &str = "hide";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Hide a task for the rest of today")
            .arg(arg_id("id", "Id of the task"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches, "id"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "hiding task...");
        habitual.hide_task(self.id).await?;
        println!("Hid task {} until tomorrow", self.id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdTaskUnhideAll {
    pub routine_id: i64,
}

impl CmdTaskUnhideAll {
    pub const NAME: &str = "unhide-all";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show every hidden task of a routine again")
            .arg(arg_id("routine", "Id of the routine"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            routine_id: get_id(matches, "routine"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "unhiding tasks...");
        let count = habitual.unhide_all_tasks(self.routine_id).await?;
        println!("Unhid {count} task(s)");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdTaskMove {
    pub routine_id: i64,
    pub from: usize,
    pub to: usize,
}

impl CmdTaskMove {
    pub const NAME: &str = "move";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("mv")
            .about("Move a task to another place in its routine")
            .arg(arg_id("routine", "Id of the routine"))
            .arg(arg_index("from", "Index of the task, as listed"))
            .arg(arg_index("to", "Index to move it to"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            routine_id: get_id(matches, "routine"),
            from: get_index(matches, "from"),
            to: get_index(matches, "to"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving task...");
        let tasks = habitual.move_task(self.routine_id, self.from, self.to).await?;
        print_tasks(habitual, tasks, ArgOutputFormat::Table).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdTaskArrange {
    pub routine_id: i64,
}

impl CmdTaskArrange {
    pub const NAME: &str = "arrange";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Reorder the tasks of a routine interactively")
            .arg(arg_id("routine", "Id of the routine"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            routine_id: get_id(matches, "routine"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual, config: DragConfig) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "arranging tasks...");
        let target = ArrangeTarget::Tasks {
            routine_id: self.routine_id,
        };
        tui::arrange(habitual, target, config).await
    }
}

async fn print_tasks(
    habitual: &Habitual,
    tasks: Vec<Task>,
    format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    let mut rows = Vec::with_capacity(tasks.len());
    for task in tasks {
        let week = habitual.week(task.id).await?;
        rows.push(TaskRow { task, week });
    }

    let formatter = TaskFormatter::new().with_output_format(format);
    print!("{}", formatter.format(&rows));
    Ok(())
}
