// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Dense `position` columns and their renumbering.
//!
//! Positions are unique per scope and checked row by row, so a multi-row shift
//! cannot write the final values directly: a row could land on a position that
//! another row has not left yet. Shifted rows are parked in the negative range
//! first, using [`encode`], and brought back with [`decode`] in a last
//! statement. `-1` is reserved as the sentinel for the moved row, and every
//! encoded value is `<= -2`, so parked rows collide neither with each other,
//! with the sentinel, nor with any real position.

/// Position of the row being moved while its siblings shift.
pub const SENTINEL: i64 = -1;

/// Parks a real position `x >= 0` in the negative range.
pub const fn encode(x: i64) -> i64 {
    -x - 2
}

/// Inverse of [`encode`].
pub const fn decode(encoded: i64) -> i64 {
    -encoded - 2
}

/// [`encode`] as an SQL expression over `expr`.
pub(crate) fn encode_sql(expr: &str) -> String {
    format!("-({expr}) - 2")
}

/// [`decode`] as an SQL expression over `expr`.
pub(crate) fn decode_sql(expr: &str) -> String {
    format!("-({expr}) - 2")
}

/// Errors of position-keeping operations.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PositionError {
    /// The underlying database failed; the transaction was rolled back.
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The item was not at the position the caller expected.
    #[error("Item {id} is not at position {expected}")]
    PositionMismatch {
        /// Id of the item.
        id: i64,
        /// Position the caller expected it at.
        expected: i64,
    },

    /// No such item in the scope.
    #[error("Item {0} not found")]
    NotFound(i64),

    /// A list index beyond the visible items.
    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of visible items.
        len: usize,
    },

    /// A name was empty or blank.
    #[error("{0} must be given a name")]
    EmptyName(&'static str),
}

/// The set of rows sharing one dense position sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// All routines.
    Routines,

    /// The tasks of one routine.
    Tasks { routine_id: i64 },
}

impl Scope {
    pub(crate) fn table(self) -> &'static str {
        match self {
            Scope::Routines => "routines",
            Scope::Tasks { .. } => "tasks",
        }
    }

    /// Extra `WHERE` condition, starting with `AND`, whose parameter is bound
    /// by [`Scope::bind`] after every other parameter.
    pub(crate) fn condition(self) -> &'static str {
        match self {
            Scope::Routines => "",
            Scope::Tasks { .. } => " AND routine_id = ?",
        }
    }

    pub(crate) fn bind<'q>(
        self,
        query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        match self {
            Scope::Routines => query,
            Scope::Tasks { routine_id } => query.bind(routine_id),
        }
    }

    pub(crate) fn bind_scalar<'q, O>(
        self,
        query: sqlx::query::QueryScalar<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> sqlx::query::QueryScalar<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>> {
        match self {
            Scope::Routines => query,
            Scope::Tasks { routine_id } => query.bind(routine_id),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Routines => write!(f, "routines"),
            Scope::Tasks { routine_id } => write!(f, "tasks of routine {routine_id}"),
        }
    }
}
