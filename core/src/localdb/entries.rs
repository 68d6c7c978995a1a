// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use sqlx::SqlitePool;

use crate::Completion;

#[derive(Debug, Clone)]
pub struct Entries {
    pool: SqlitePool,
}

impl Entries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn set(
        &self,
        task_id: i64,
        date: Date,
        value: Completion,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO entries (task_id, date, value)
VALUES (?, ?, ?)
ON CONFLICT(task_id, date) DO UPDATE SET
    value = excluded.value;
";

        sqlx::query(SQL)
            .bind(task_id)
            .bind(date.to_string())
            .bind(value.as_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get(&self, task_id: i64, date: Date) -> Result<Option<Completion>, sqlx::Error> {
        const SQL: &str = "\
SELECT value
FROM entries
WHERE task_id = ? AND date = ?;
";

        let value: Option<i64> = sqlx::query_scalar(SQL)
            .bind(task_id)
            .bind(date.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(value.and_then(Completion::from_db))
    }

    /// Entries of the task between `from` and `to`, both inclusive, ordered by
    /// date. `None` leaves that end open.
    pub async fn list(
        &self,
        task_id: i64,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<(Date, Completion)>, sqlx::Error> {
        let mut sql = "SELECT date, value FROM entries WHERE task_id = ?".to_string();
        if from.is_some() {
            sql += " AND date >= ?";
        }
        if to.is_some() {
            sql += " AND date <= ?";
        }
        sql += " ORDER BY date;";

        let mut query = sqlx::query_as::<_, EntryRecord>(&sql).bind(task_id);
        if let Some(from) = from {
            query = query.bind(from.to_string());
        }
        if let Some(to) = to {
            query = query.bind(to.to_string());
        }

        let records = query.fetch_all(&self.pool).await?;
        Ok(records.into_iter().filter_map(EntryRecord::parse).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EntryRecord {
    date: String,
    value: i64,
}

impl EntryRecord {
    fn parse(self) -> Option<(Date, Completion)> {
        let date = match self.date.parse() {
            Ok(date) => date,
            Err(err) => {
                tracing::warn!(date = %self.date, %err, "skipping entry with malformed date");
                return None;
            }
        };
        Completion::from_db(self.value).map(|value| (date, value))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::localdb::tests_utils::setup_test_db;

    async fn setup_task(db: &crate::localdb::LocalDb) -> i64 {
        let routine = db.routines.insert("Morning").await.unwrap().id();
        db.tasks.insert(routine, "Stretch").await.unwrap().id()
    }

    #[tokio::test]
    async fn entries_set_upserts() {
        // Arrange
        let db = setup_test_db().await;
        let task = setup_task(&db).await;
        let day = date(2026, 3, 1);

        // Act
        db.entries.set(task, day, Completion::Half).await.unwrap();
        db.entries.set(task, day, Completion::Full).await.unwrap();

        // Assert
        let value = db.entries.get(task, day).await.expect("Failed to get entry");
        assert_eq!(value, Some(Completion::Full));
        assert_eq!(db.entries.list(task, None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn entries_get_missing_is_none() {
        // Arrange
        let db = setup_test_db().await;
        let task = setup_task(&db).await;

        // Act
        let value = db.entries.get(task, date(2026, 3, 1)).await.unwrap();

        // Assert
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn entries_list_is_date_ordered_and_bounded() {
        // Arrange
        let db = setup_test_db().await;
        let task = setup_task(&db).await;
        for (day, value) in [
            (date(2026, 3, 3), Completion::Full),
            (date(2026, 2, 28), Completion::Half),
            (date(2026, 3, 1), Completion::Empty),
        ] {
            db.entries.set(task, day, value).await.unwrap();
        }

        // Act
        let all = db.entries.list(task, None, None).await.unwrap();
        let bounded = db
            .entries
            .list(task, Some(date(2026, 3, 1)), Some(date(2026, 3, 2)))
            .await
            .unwrap();

        // Assert
        let days: Vec<Date> = all.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            days,
            vec![date(2026, 2, 28), date(2026, 3, 1), date(2026, 3, 3)]
        );
        assert_eq!(bounded, vec![(date(2026, 3, 1), Completion::Empty)]);
    }

    #[tokio::test]
    async fn entries_follow_task_deletion() {
        // Arrange
        let db = setup_test_db().await;
        let task = setup_task(&db).await;
        let record = db.tasks.get(task).await.unwrap().unwrap();
        let routine = crate::Task::from(record).routine_id;
        db.entries
            .set(task, date(2026, 3, 1), Completion::Full)
            .await
            .unwrap();

        // Act
        db.tasks.delete(routine, task).await.unwrap();

        // Assert
        assert!(db.entries.list(task, None, None).await.unwrap().is_empty());
    }
}
