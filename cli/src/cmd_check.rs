// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use habitual_core::{Completion, Habitual};
use jiff::civil::Date;

use crate::util::{arg_id, get_id, parse_date};

/// Records how much of a task was done on a day.
#[derive(Debug, Clone, Copy)]
pub struct CmdCheck {
    pub task_id: i64,

    /// Defaults to today.
    pub date: Option<Date>,

    /// Without a value, the entry cycles through empty, half and full.
    pub value: Option<Completion>,
}

impl CmdCheck {
    pub const NAME: &str = "check";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("c")
            .about("Check in a task for today or another day")
            .arg(arg_id("task", "Id of the task"))
            .arg(
                arg!(-d --date <DATE> "Day to record, as YYYY-MM-DD; defaults to today")
                    .value_parser(parse_date),
            )
            .arg(
                arg!(--value <VALUE> "Completion to record; cycles empty, half, full when omitted")
                    .value_parser(value_parser!(Completion)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            task_id: get_id(matches, "task"),
            date: matches.get_one::<Date>("date").copied(),
            value: matches.get_one::<Completion>("value").copied(),
        }
    }

    pub async fn run(self, habitual: &mut Habitual) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking in task...");
        let task = habitual.get_task(self.task_id).await?;
        let date = self.date.unwrap_or_else(|| habitual.today());
        let value = match self.value {
            Some(value) => {
                habitual.set_entry(task.id, date, value).await?;
                value
            }
            None => habitual.cycle_entry(task.id, date).await?,
        };

        println!("{} on {date}: {value}", task.name);
        Ok(())
    }
}
