// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use habitual_core::Habitual;
use habitual_dnd::DragConfig;

use crate::routine_formatter::RoutineFormatter;
use crate::tui::{self, ArrangeTarget};
use crate::util::{
    ArgOutputFormat, arg_id, arg_index, arg_name, get_id, get_index, get_name,
};

#[derive(Debug, Clone, Copy)]
pub struct CmdRoutineList {
    pub output_format: ArgOutputFormat,
}

impl CmdRoutineList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the routines shown today")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing routines...");
        let routines = habitual.list_routines().await?;
        let formatter = RoutineFormatter::new().with_output_format(self.output_format);
        print!("{}", formatter.format(&routines));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRoutineNew {
    pub name: String,
}

impl CmdRoutineNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a routine at the end of the list")
            .arg(arg_name("Name of the routine"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: get_name(matches),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding routine...");
        let routine = habitual.new_routine(&self.name).await?;
        println!("Added routine {}: {}", routine.id, routine.name);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRoutineRename {
    pub id: i64,
    pub name: String,
}

impl CmdRoutineRename {
    pub const NAME: &str = "rename";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Rename a routine")
            .arg(arg_id("id", "Id of the routine"))
            .arg(arg_name("New name of the routine"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches, "id"),
            name: get_name(matches),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "renaming routine...");
        let routine = habitual.rename_routine(self.id, &self.name).await?;
        println!("Renamed routine {}: {}", routine.id, routine.name);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRoutineDelete {
    pub id: i64,
}

impl CmdRoutineDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a routine with its tasks and their history")
            .arg(arg_id("id", "Id of the routine"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches, "id"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting routine...");
        habitual.delete_routine(self.id).await?;
        println!("Deleted routine {}", self.id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRoutineHide {
    pub id: i64,
}

impl CmdRoutineHide {
    pub const NAME: &str = "hide";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Hide a routine for the rest of today")
            .arg(arg_id("id", "Id of the routine"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches, "id"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "hiding routine...");
        habitual.hide_routine(self.id).await?;
        println!("Hid routine {} until tomorrow", self.id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRoutineUnhideAll;

impl CmdRoutineUnhideAll {
    pub const NAME: &str = "unhide-all";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show every hidden routine again")
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!("unhiding routines...");
        let count = habitual.unhide_all_routines().await?;
        println!("Unhid {count} routine(s)");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRoutineMove {
    pub from: usize,
    pub to: usize,
}

impl CmdRoutineMove {
    pub const NAME: &str = "move";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("mv")
            .about("Move a routine to another place in the list")
            .arg(arg_index("from", "Index of the routine, as listed"))
            .arg(arg_index("to", "Index to move it to"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            from: get_index(matches, "from"),
            to: get_index(matches, "to"),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving routine...");
        let routines = habitual.move_routine(self.from, self.to).await?;
        print!("{}", RoutineFormatter::new().format(&routines));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRoutineArrange;

impl CmdRoutineArrange {
    pub const NAME: &str = "arrange";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Reorder routines interactively")
    }

    pub async fn run(self, habitual: &mut Habitual, config: DragConfig) -> Result<(), Box<dyn Error>> {
        tracing::debug!("arranging routines...");
        tui::arrange(habitual, ArrangeTarget::Routines, config).await
    }
}
