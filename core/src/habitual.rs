// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::error::Error;

use jiff::ToSpan;
use jiff::Zoned;
use jiff::civil::Date;
use tokio::fs;

use crate::localdb::LocalDb;
use crate::position::PositionError;
use crate::{Completion, Config, Routine, Task};

/// Number of days in the day strip of a task.
pub const WEEK_DAYS: i64 = 7;

/// Habit tracker application core.
#[derive(Debug, Clone)]
pub struct Habitual {
    today: Date,
    config: Config,
    db: LocalDb,
}

impl Habitual {
    /// Creates a new instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(config.db_path().as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        Ok(Self {
            today: Zoned::now().date(),
            config,
            db,
        })
    }

    /// The normalized configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The day hidden items are compared against.
    pub fn today(&self) -> Date {
        self.today
    }

    /// Refresh the current day to today.
    pub fn refresh_today(&mut self) {
        self.today = Zoned::now().date();
    }

    /// Pretend the current day is `today`.
    pub fn set_today(&mut self, today: Date) {
        self.today = today;
    }

    /// Routines visible today, ordered by position.
    pub async fn list_routines(&self) -> Result<Vec<Routine>, Box<dyn Error>> {
        let records = self.db.routines.list_visible(self.today).await?;
        Ok(records.into_iter().map(Routine::from).collect())
    }

    /// Every routine, hidden or not, ordered by position.
    pub async fn list_all_routines(&self) -> Result<Vec<Routine>, Box<dyn Error>> {
        let records = self.db.routines.list_all().await?;
        Ok(records.into_iter().map(Routine::from).collect())
    }

    /// Appends a new routine.
    pub async fn new_routine(&self, name: &str) -> Result<Routine, Box<dyn Error>> {
        let name = validate_name(name, "New routine")?;
        let record = self.db.routines.insert(name).await?;
        tracing::info!(id = record.id(), name, "routine created");
        Ok(record.into())
    }

    pub async fn rename_routine(&self, id: i64, name: &str) -> Result<Routine, Box<dyn Error>> {
        let name = validate_name(name, "Routine")?;
        if !self.db.routines.rename(id, name).await? {
            return Err(PositionError::NotFound(id).into());
        }
        self.get_routine(id).await
    }

    pub async fn get_routine(&self, id: i64) -> Result<Routine, Box<dyn Error>> {
        match self.db.routines.get(id).await? {
            Some(record) => Ok(record.into()),
            None => Err(PositionError::NotFound(id).into()),
        }
    }

    /// Deletes a routine together with its tasks and their entries.
    pub async fn delete_routine(&self, id: i64) -> Result<(), Box<dyn Error>> {
        self.db.routines.delete(id).await?;
        tracing::info!(id, "routine deleted");
        Ok(())
    }

    /// Hides a routine for the rest of today.
    pub async fn hide_routine(&self, id: i64) -> Result<(), Box<dyn Error>> {
        if !self.db.routines.set_hidden(id, Some(self.today)).await? {
            return Err(PositionError::NotFound(id).into());
        }
        Ok(())
    }

    /// Returns the number of routines shown again.
    pub async fn unhide_all_routines(&self) -> Result<u64, Box<dyn Error>> {
        Ok(self.db.routines.unhide_all().await?)
    }

    /// Moves the routine shown at `start_index` to `end_index` of the visible
    /// list, and returns the list as stored afterwards.
    pub async fn move_routine(
        &self,
        start_index: usize,
        end_index: usize,
    ) -> Result<Vec<Routine>, Box<dyn Error>> {
        let visible = self.db.routines.list_visible(self.today).await?;
        let start = pick(&visible, start_index)?;
        let end = pick(&visible, end_index)?;

        self.db
            .routines
            .reorder(start.id(), start.position(), end.position())
            .await?;
        self.list_routines().await
    }

    /// Tasks of a routine visible today, ordered by position.
    pub async fn list_tasks(&self, routine_id: i64) -> Result<Vec<Task>, Box<dyn Error>> {
        let records = self.db.tasks.list_visible(routine_id, self.today).await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    /// Every task of a routine, hidden or not, ordered by position.
    pub async fn list_all_tasks(&self, routine_id: i64) -> Result<Vec<Task>, Box<dyn Error>> {
        let records = self.db.tasks.list_all(routine_id).await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    /// Appends a new task to a routine.
    pub async fn new_task(&self, routine_id: i64, name: &str) -> Result<Task, Box<dyn Error>> {
        let name = validate_name(name, "New task")?;
        if self.db.routines.get(routine_id).await?.is_none() {
            return Err(PositionError::NotFound(routine_id).into());
        }

        let record = self.db.tasks.insert(routine_id, name).await?;
        tracing::info!(id = record.id(), routine_id, name, "task created");
        Ok(record.into())
    }

    pub async fn rename_task(&self, id: i64, name: &str) -> Result<Task, Box<dyn Error>> {
        let name = validate_name(name, "Task")?;
        if !self.db.tasks.rename(id, name).await? {
            return Err(PositionError::NotFound(id).into());
        }
        self.get_task(id).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, Box<dyn Error>> {
        match self.db.tasks.get(id).await? {
            Some(record) => Ok(record.into()),
            None => Err(PositionError::NotFound(id).into()),
        }
    }

    /// Deletes a task together with its entries.
    pub async fn delete_task(&self, id: i64) -> Result<(), Box<dyn Error>> {
        let task = self.get_task(id).await?;
        self.db.tasks.delete(task.routine_id, id).await?;
        tracing::info!(id, routine_id = task.routine_id, "task deleted");
        Ok(())
    }

    /// Hides a task for the rest of today.
    pub async fn hide_task(&self, id: i64) -> Result<(), Box<dyn Error>> {
        if !self.db.tasks.set_hidden(id, Some(self.today)).await? {
            return Err(PositionError::NotFound(id).into());
        }
        Ok(())
    }

    /// Returns the number of tasks of the routine shown again.
    pub async fn unhide_all_tasks(&self, routine_id: i64) -> Result<u64, Box<dyn Error>> {
        Ok(self.db.tasks.unhide_all(routine_id).await?)
    }

    /// Moves the task shown at `start_index` to `end_index` of the routine's
    /// visible list, and returns the list as stored afterwards.
    pub async fn move_task(
        &self,
        routine_id: i64,
        start_index: usize,
        end_index: usize,
    ) -> Result<Vec<Task>, Box<dyn Error>> {
        let visible = self.db.tasks.list_visible(routine_id, self.today).await?;
        let start = pick(&visible, start_index)?;
        let end = pick(&visible, end_index)?;

        self.db
            .tasks
            .reorder(routine_id, start.id(), start.position(), end.position())
            .await?;
        self.list_tasks(routine_id).await
    }

    pub async fn set_entry(
        &self,
        task_id: i64,
        date: Date,
        value: Completion,
    ) -> Result<(), Box<dyn Error>> {
        self.db
            .entries
            .set(task_id, date, value)
            .await
            .map_err(|e| format!("Failed to record entry of task {task_id}: {e}"))?;
        tracing::debug!(task_id, %date, %value, "entry recorded");
        Ok(())
    }

    /// Completion of a task on a day; `Empty` when nothing was recorded.
    pub async fn entry(&self, task_id: i64, date: Date) -> Result<Completion, Box<dyn Error>> {
        Ok(self
            .db
            .entries
            .get(task_id, date)
            .await?
            .unwrap_or_default())
    }

    /// Every recorded entry of a task.
    pub async fn entries(&self, task_id: i64) -> Result<BTreeMap<Date, Completion>, Box<dyn Error>> {
        let entries = self.db.entries.list(task_id, None, None).await?;
        Ok(entries.into_iter().collect())
    }

    /// Completion of the last [`WEEK_DAYS`] days, today first.
    pub async fn week(&self, task_id: i64) -> Result<Vec<(Date, Completion)>, Box<dyn Error>> {
        let first = self.today.checked_sub((WEEK_DAYS - 1).days())?;
        let recorded: BTreeMap<Date, Completion> = self
            .db
            .entries
            .list(task_id, Some(first), Some(self.today))
            .await?
            .into_iter()
            .collect();

        (0..WEEK_DAYS)
            .map(|i| -> Result<_, Box<dyn Error>> {
                let day = self.today.checked_sub(i.days())?;
                Ok((day, recorded.get(&day).copied().unwrap_or_default()))
            })
            .collect()
    }

    /// Advances the entry of a day to the next value and returns it.
    pub async fn cycle_entry(
        &self,
        task_id: i64,
        date: Date,
    ) -> Result<Completion, Box<dyn Error>> {
        let next = self.entry(task_id, date).await?.cycle();
        self.set_entry(task_id, date, next).await?;
        Ok(next)
    }

    /// Close the application core, saving any changes.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }
}

fn validate_name<'a>(name: &'a str, what: &'static str) -> Result<&'a str, PositionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PositionError::EmptyName(what));
    }
    Ok(name)
}

fn pick<T>(visible: &[T], index: usize) -> Result<&T, PositionError> {
    visible.get(index).ok_or(PositionError::IndexOutOfRange {
        index,
        len: visible.len(),
    })
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create state directory: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    async fn setup() -> Habitual {
        let db = LocalDb::open(None)
            .await
            .expect("Failed to create test database");
        Habitual {
            today: date(2026, 3, 10),
            config: Config::default(),
            db,
        }
    }

    #[test]
    fn validate_name_trims_and_rejects_blank() {
        assert_eq!(validate_name("  Run ", "Task").unwrap(), "Run");
        let err = validate_name(" \t", "New routine").unwrap_err();
        assert_eq!(err.to_string(), "New routine must be given a name");
    }

    #[tokio::test]
    async fn new_routine_rejects_empty_name() {
        // Arrange
        let habitual = setup().await;

        // Act
        let result = habitual.new_routine("").await;

        // Assert
        let err = result.expect_err("empty name must be rejected");
        assert_eq!(err.to_string(), "New routine must be given a name");
        assert!(habitual.list_routines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn move_routine_out_of_range_is_rejected() {
        // Arrange
        let habitual = setup().await;
        habitual.new_routine("A").await.unwrap();
        habitual.new_routine("B").await.unwrap();

        // Act
        let result = habitual.move_routine(0, 2).await;

        // Assert
        let err = result.expect_err("index 2 is out of range");
        assert_eq!(err.to_string(), "Index 2 is out of range for 2 items");
    }

    #[tokio::test]
    async fn move_routine_skips_hidden_rows() {
        // Arrange
        let habitual = setup().await;
        let a = habitual.new_routine("A").await.unwrap();
        let b = habitual.new_routine("B").await.unwrap();
        habitual.new_routine("C").await.unwrap();
        habitual.hide_routine(b.id).await.unwrap();

        // Act: visible [A, C], move A below C
        let moved = habitual.move_routine(0, 1).await.expect("Failed to move");

        // Assert
        let names: Vec<_> = moved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
        let all: Vec<_> = habitual
            .list_all_routines()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.name, r.position))
            .collect();
        assert_eq!(
            all,
            vec![
                ("B".to_string(), 0),
                ("C".to_string(), 1),
                ("A".to_string(), 2)
            ]
        );
        assert_eq!(habitual.get_routine(a.id).await.unwrap().position, 2);
    }

    #[tokio::test]
    async fn week_lists_today_first_with_defaults() {
        // Arrange
        let habitual = setup().await;
        let routine = habitual.new_routine("Morning").await.unwrap();
        let task = habitual.new_task(routine.id, "Stretch").await.unwrap();
        habitual
            .set_entry(task.id, date(2026, 3, 10), Completion::Full)
            .await
            .unwrap();
        habitual
            .set_entry(task.id, date(2026, 3, 8), Completion::Half)
            .await
            .unwrap();
        habitual
            .set_entry(task.id, date(2026, 3, 1), Completion::Full)
            .await
            .unwrap();

        // Act
        let week = habitual.week(task.id).await.expect("Failed to get week");

        // Assert
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], (date(2026, 3, 10), Completion::Full));
        assert_eq!(week[1], (date(2026, 3, 9), Completion::Empty));
        assert_eq!(week[2], (date(2026, 3, 8), Completion::Half));
        assert_eq!(week[6].0, date(2026, 3, 4));
        assert!(week[3..].iter().all(|(_, c)| *c == Completion::Empty));
    }

    #[tokio::test]
    async fn cycle_entry_wraps_around() {
        // Arrange
        let habitual = setup().await;
        let routine = habitual.new_routine("Morning").await.unwrap();
        let task = habitual.new_task(routine.id, "Stretch").await.unwrap();
        let day = habitual.today();

        // Act
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(habitual.cycle_entry(task.id, day).await.unwrap());
        }

        // Assert
        assert_eq!(
            seen,
            vec![
                Completion::Half,
                Completion::Full,
                Completion::Empty,
                Completion::Half
            ]
        );
    }

    #[tokio::test]
    async fn new_task_requires_routine() {
        // Arrange
        let habitual = setup().await;

        // Act
        let result = habitual.new_task(7, "Orphan").await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), "Item 7 not found");
    }
}
