// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use sqlx::SqlitePool;

use crate::Task;
use crate::localdb::renumber;
use crate::localdb::routines::parse_day;
use crate::position::{PositionError, Scope};

#[derive(Debug, Clone)]
pub struct Tasks {
    pool: SqlitePool,
}

impl Tasks {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends a task after every existing task of the routine.
    pub async fn insert(&self, routine_id: i64, name: &str) -> Result<TaskRecord, PositionError> {
        const SQL: &str = "\
INSERT INTO tasks (routine_id, name, position)
VALUES (?, ?, ?)
RETURNING id, routine_id, name, position, hidden;
";

        let mut tx = self.pool.begin().await?;
        let position = renumber::next_position(&mut tx, Scope::Tasks { routine_id }).await?;
        let record: TaskRecord = sqlx::query_as(SQL)
            .bind(routine_id)
            .bind(name)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(id = record.id, routine_id, position, "task inserted");
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Option<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, routine_id, name, position, hidden
FROM tasks
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Tasks of the routine not hidden on `today`, ordered by position.
    pub async fn list_visible(
        &self,
        routine_id: i64,
        today: Date,
    ) -> Result<Vec<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, routine_id, name, position, hidden
FROM tasks
WHERE routine_id = ? AND (hidden IS NULL OR hidden != ?)
ORDER BY position;
";

        sqlx::query_as(SQL)
            .bind(routine_id)
            .bind(today.to_string())
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_all(&self, routine_id: i64) -> Result<Vec<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, routine_id, name, position, hidden
FROM tasks
WHERE routine_id = ?
ORDER BY position;
";

        sqlx::query_as(SQL)
            .bind(routine_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Returns whether the task exists.
    pub async fn rename(&self, id: i64, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET name = ? WHERE id = ?;")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns whether the task exists.
    pub async fn set_hidden(&self, id: i64, hidden: Option<Date>) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET hidden = ? WHERE id = ?;")
            .bind(hidden.map(|d| d.to_string()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns the number of tasks of the routine that were hidden.
    pub async fn unhide_all(&self, routine_id: i64) -> Result<u64, sqlx::Error> {
        const SQL: &str = "\
UPDATE tasks SET hidden = NULL
WHERE routine_id = ? AND hidden IS NOT NULL;
";

        let result = sqlx::query(SQL)
            .bind(routine_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes a task of the routine and its entries, and closes the gap.
    pub async fn delete(&self, routine_id: i64, id: i64) -> Result<(), PositionError> {
        renumber::delete(&self.pool, Scope::Tasks { routine_id }, id).await
    }

    pub async fn reorder(
        &self,
        routine_id: i64,
        id: i64,
        start: i64,
        end: i64,
    ) -> Result<(), PositionError> {
        renumber::reorder(&self.pool, Scope::Tasks { routine_id }, id, start, end).await
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    id: i64,
    routine_id: i64,
    name: String,
    position: i64,
    hidden: Option<String>,
}

impl TaskRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn position(&self) -> i64 {
        self.position
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            id: record.id,
            routine_id: record.routine_id,
            name: record.name,
            position: record.position,
            hidden: parse_day(record.hidden.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::localdb::tests_utils::{assert_dense, setup_test_db};

    async fn setup_routine(db: &crate::localdb::LocalDb, name: &str) -> i64 {
        db.routines
            .insert(name)
            .await
            .expect("Failed to insert routine")
            .id()
    }

    #[tokio::test]
    async fn tasks_positions_are_per_routine() {
        // Arrange
        let db = setup_test_db().await;
        let morning = setup_routine(&db, "Morning").await;
        let evening = setup_routine(&db, "Evening").await;

        // Act
        let a = db.tasks.insert(morning, "Stretch").await.unwrap();
        let b = db.tasks.insert(evening, "Read").await.unwrap();
        let c = db.tasks.insert(morning, "Water").await.unwrap();

        // Assert
        assert_eq!((a.position(), b.position(), c.position()), (0, 0, 1));
        assert_eq!(c.routine_id, morning);
        assert_dense(db.pool(), Scope::Tasks { routine_id: morning }).await;
        assert_dense(db.pool(), Scope::Tasks { routine_id: evening }).await;
    }

    #[tokio::test]
    async fn tasks_insert_into_missing_routine_fails() {
        // Arrange
        let db = setup_test_db().await;

        // Act
        let result = db.tasks.insert(42, "Orphan").await;

        // Assert
        assert!(matches!(result, Err(PositionError::Sqlx(_))));
    }

    #[tokio::test]
    async fn tasks_list_visible_filters_hidden_today() {
        // Arrange
        let db = setup_test_db().await;
        let routine = setup_routine(&db, "Morning").await;
        let today = date(2026, 3, 1);
        let a = db.tasks.insert(routine, "A").await.unwrap();
        db.tasks.insert(routine, "B").await.unwrap();
        db.tasks.set_hidden(a.id(), Some(today)).await.unwrap();

        // Act
        let visible: Vec<Task> = db
            .tasks
            .list_visible(routine, today)
            .await
            .expect("Failed to list tasks")
            .into_iter()
            .map(Task::from)
            .collect();
        let all = db.tasks.list_all(routine).await.unwrap();

        // Assert
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "B");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn tasks_unhide_all_only_touches_routine() {
        // Arrange
        let db = setup_test_db().await;
        let today = date(2026, 3, 1);
        let morning = setup_routine(&db, "Morning").await;
        let evening = setup_routine(&db, "Evening").await;
        let a = db.tasks.insert(morning, "A").await.unwrap();
        let b = db.tasks.insert(evening, "B").await.unwrap();
        db.tasks.set_hidden(a.id(), Some(today)).await.unwrap();
        db.tasks.set_hidden(b.id(), Some(today)).await.unwrap();

        // Act
        let unhidden = db.tasks.unhide_all(morning).await.unwrap();

        // Assert
        assert_eq!(unhidden, 1);
        let b: Task = db.tasks.get(b.id()).await.unwrap().unwrap().into();
        assert_eq!(b.hidden, Some(today));
    }

    #[tokio::test]
    async fn tasks_reorder_and_delete_keep_density() {
        // Arrange
        let db = setup_test_db().await;
        let routine = setup_routine(&db, "Morning").await;
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(db.tasks.insert(routine, name).await.unwrap().id());
        }
        let scope = Scope::Tasks { routine_id: routine };

        // Act
        db.tasks
            .reorder(routine, ids[3], 3, 0)
            .await
            .expect("Failed to reorder");
        db.tasks
            .delete(routine, ids[1])
            .await
            .expect("Failed to delete");

        // Assert
        let names: Vec<String> = db
            .tasks
            .list_all(routine)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["D", "A", "C"]);
        assert_dense(db.pool(), scope).await;
    }

    #[tokio::test]
    async fn tasks_delete_from_other_routine_is_not_found() {
        // Arrange
        let db = setup_test_db().await;
        let morning = setup_routine(&db, "Morning").await;
        let evening = setup_routine(&db, "Evening").await;
        let a = db.tasks.insert(morning, "A").await.unwrap();

        // Act
        let result = db.tasks.delete(evening, a.id()).await;

        // Assert
        assert!(matches!(result, Err(PositionError::NotFound(_))));
        assert!(db.tasks.get(a.id()).await.unwrap().is_some());
    }
}
