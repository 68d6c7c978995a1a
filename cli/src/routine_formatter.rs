// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use habitual_core::Routine;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct RoutineFormatter {
    columns: Vec<RoutineColumn>,
    format: ArgOutputFormat,
}

impl RoutineFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                RoutineColumn::Index,
                RoutineColumn::Id,
                RoutineColumn::Name,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, routines: &'a [Routine]) -> Display<'a> {
        Display {
            routines,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    routines: &'a [Routine],
    formatter: &'a RoutineFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.routines).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            ArgOutputFormat::Table => {
                let rows: Vec<(usize, &Routine)> = self.routines.iter().enumerate().collect();
                write!(f, "{}", Table::new(&self.formatter.columns, &rows))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RoutineColumn {
    /// Place in the list as shown, the index `move` takes.
    Index,
    Id,
    Name,
}

impl Column<(usize, &Routine)> for RoutineColumn {
    fn format(&self, (index, routine): &(usize, &Routine)) -> String {
        match self {
            RoutineColumn::Index => format!("#{index}"),
            RoutineColumn::Id => routine.id.to_string(),
            RoutineColumn::Name => routine.name.clone(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            RoutineColumn::Index | RoutineColumn::Id => PaddingDirection::Right,
            RoutineColumn::Name => PaddingDirection::Left,
        }
    }
}
