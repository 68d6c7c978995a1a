// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil::Date;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Row id of a routine or a task.
pub fn arg_id(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name("ID")
        .help(help)
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn get_id(matches: &ArgMatches, name: &str) -> i64 {
    match matches.get_one::<i64>(name) {
        Some(id) => *id,
        None => unreachable!(),
    }
}

/// Index into the list as currently shown, starting at zero.
pub fn arg_index(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name("INDEX")
        .help(help)
        .required(true)
        .value_parser(value_parser!(usize))
}

pub fn get_index(matches: &ArgMatches, name: &str) -> usize {
    match matches.get_one::<usize>(name) {
        Some(index) => *index,
        None => unreachable!(),
    }
}

pub fn arg_name(help: &'static str) -> Arg {
    arg!(name: <NAME>).help(help)
}

pub fn get_name(matches: &ArgMatches) -> String {
    match matches.get_one::<String>("name") {
        Some(name) => name.clone(),
        None => unreachable!(),
    }
}

/// Parses a civil date such as `2026-03-10`.
pub fn parse_date(s: &str) -> Result<Date, String> {
    s.trim()
        .parse()
        .map_err(|e| format!("Invalid date '{s}', expected YYYY-MM-DD: {e}"))
}
