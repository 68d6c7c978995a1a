// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use sqlx::SqlitePool;

use crate::Routine;
use crate::localdb::renumber;
use crate::position::{PositionError, Scope};

#[derive(Debug, Clone)]
pub struct Routines {
    pool: SqlitePool,
}

impl Routines {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends a routine after every existing one.
    pub async fn insert(&self, name: &str) -> Result<RoutineRecord, PositionError> {
        const SQL: &str = "\
INSERT INTO routines (name, position)
VALUES (?, ?)
RETURNING id, name, position, hidden;
";

        let mut tx = self.pool.begin().await?;
        let position = renumber::next_position(&mut tx, Scope::Routines).await?;
        let record: RoutineRecord = sqlx::query_as(SQL)
            .bind(name)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(id = record.id, position, "routine inserted");
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Option<RoutineRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, position, hidden
FROM routines
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Routines not hidden on `today`, ordered by position.
    pub async fn list_visible(&self, today: Date) -> Result<Vec<RoutineRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, position, hidden
FROM routines
WHERE hidden IS NULL OR hidden != ?
ORDER BY position;
";

        sqlx::query_as(SQL)
            .bind(today.to_string())
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<RoutineRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, position, hidden
FROM routines
ORDER BY position;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Returns whether the routine exists.
    pub async fn rename(&self, id: i64, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE routines SET name = ? WHERE id = ?;")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns whether the routine exists.
    pub async fn set_hidden(&self, id: i64, hidden: Option<Date>) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE routines SET hidden = ? WHERE id = ?;")
            .bind(hidden.map(|d| d.to_string()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns the number of routines that were hidden.
    pub async fn unhide_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE routines SET hidden = NULL WHERE hidden IS NOT NULL;")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes a routine, its tasks and their entries, and closes the gap.
    pub async fn delete(&self, id: i64) -> Result<(), PositionError> {
        renumber::delete(&self.pool, Scope::Routines, id).await
    }

    pub async fn reorder(&self, id: i64, start: i64, end: i64) -> Result<(), PositionError> {
        renumber::reorder(&self.pool, Scope::Routines, id, start, end).await
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoutineRecord {
    id: i64,
    name: String,
    position: i64,
    hidden: Option<String>,
}

impl RoutineRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn position(&self) -> i64 {
        self.position
    }
}

impl From<RoutineRecord> for Routine {
    fn from(record: RoutineRecord) -> Self {
        Routine {
            id: record.id,
            name: record.name,
            position: record.position,
            hidden: parse_day(record.hidden.as_deref()),
        }
    }
}

pub(crate) fn parse_day(value: Option<&str>) -> Option<Date> {
    let value = value?;
    match value.parse() {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(value, %err, "ignoring malformed hidden day");
            None
        }
    }
}
