// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::Color;
use habitual_core::{Completion, Task};
use jiff::civil::Date;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::ArgOutputFormat;

/// A task with its recent completion, today first.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub week: Vec<(Date, Completion)>,
}

impl TaskRow {
    fn today(&self) -> Completion {
        self.week.first().map(|(_, c)| *c).unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct TaskFormatter {
    columns: Vec<TaskColumn>,
    format: ArgOutputFormat,
}

impl TaskFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                TaskColumn::Index,
                TaskColumn::Id,
                TaskColumn::Week,
                TaskColumn::Name,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, tasks: &'a [TaskRow]) -> Display<'a> {
        Display {
            tasks,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    tasks: &'a [TaskRow],
    formatter: &'a TaskFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.tasks).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            ArgOutputFormat::Table => {
                let rows: Vec<(usize, &TaskRow)> = self.tasks.iter().enumerate().collect();
                write!(f, "{}", Table::new(&self.formatter.columns, &rows))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TaskColumn {
    Index,
    Id,
    /// Day strip, today on the left.
    Week,
    Name,
}

impl Column<(usize, &TaskRow)> for TaskColumn {
    fn format(&self, (index, row): &(usize, &TaskRow)) -> String {
        match self {
            TaskColumn::Index => format!("#{index}"),
            TaskColumn::Id => row.task.id.to_string(),
            TaskColumn::Week => row.week.iter().map(|(_, c)| glyph(*c)).collect(),
            TaskColumn::Name => row.task.name.clone(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TaskColumn::Index | TaskColumn::Id => PaddingDirection::Right,
            TaskColumn::Week | TaskColumn::Name => PaddingDirection::Left,
        }
    }

    fn color(&self, (_, row): &(usize, &TaskRow)) -> Option<Color> {
        match (self, row.today()) {
            (TaskColumn::Name, Completion::Full) => Some(Color::Green),
            (TaskColumn::Name, Completion::Half) => Some(Color::Yellow),
            _ => None,
        }
    }
}

fn glyph(completion: Completion) -> char {
    match completion {
        Completion::Empty => '·',
        Completion::Half => '◐',
        Completion::Full => '●',
    }
}
