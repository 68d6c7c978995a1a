// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;

/// A named group of tasks, shown in the routine list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Routine {
    /// Row id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Dense position among all routines.
    pub position: i64,

    /// Day the routine was hidden on, if any.
    pub hidden: Option<Date>,
}

/// A checkable task of a routine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Task {
    /// Row id.
    pub id: i64,

    /// Owning routine.
    pub routine_id: i64,

    /// Display name.
    pub name: String,

    /// Dense position among the routine's tasks.
    pub position: i64,

    /// Day the task was hidden on, if any.
    pub hidden: Option<Date>,
}

/// How much of a task was done on a day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    /// Not done.
    #[default]
    Empty,

    /// Partially done.
    Half,

    /// Done.
    Full,
}

impl Completion {
    /// Next value in the tap cycle: empty, half, full, empty.
    pub fn cycle(self) -> Self {
        match self {
            Completion::Empty => Completion::Half,
            Completion::Half => Completion::Full,
            Completion::Full => Completion::Empty,
        }
    }

    pub(crate) fn as_db(self) -> i64 {
        match self {
            Completion::Empty => 0,
            Completion::Half => 1,
            Completion::Full => 2,
        }
    }

    pub(crate) fn from_db(value: i64) -> Option<Self> {
        match value {
            0 => Some(Completion::Empty),
            1 => Some(Completion::Half),
            2 => Some(Completion::Full),
            _ => None,
        }
    }
}

impl AsRef<str> for Completion {
    fn as_ref(&self) -> &str {
        match self {
            Completion::Empty => "empty",
            Completion::Half => "half",
            Completion::Full => "full",
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Completion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" | "0" => Ok(Completion::Empty),
            "half" | "1" => Ok(Completion::Half),
            "full" | "2" => Ok(Completion::Full),
            _ => Err(format!("Invalid completion: {s}")),
        }
    }
}
