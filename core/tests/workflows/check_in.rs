// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Daily completion entries.

use habitual_core::Completion;
use jiff::civil::date;

use crate::common::{seed_routines, setup_habitual, setup_temp_dirs};

#[tokio::test]
async fn entries_map_is_date_ordered() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let routine = seed_routines(&habitual, &["Morning"]).await[0].id;
    let task = habitual.new_task(routine, "Stretch").await.unwrap();

    // Act
    habitual
        .set_entry(task.id, date(2026, 3, 9), Completion::Half)
        .await
        .unwrap();
    habitual
        .set_entry(task.id, date(2026, 3, 2), Completion::Full)
        .await
        .unwrap();
    let entries = habitual.entries(task.id).await.unwrap();

    // Assert
    let days: Vec<_> = entries.keys().copied().collect();
    assert_eq!(days, vec![date(2026, 3, 2), date(2026, 3, 9)]);
    assert_eq!(
        habitual.entry(task.id, date(2026, 3, 5)).await.unwrap(),
        Completion::Empty
    );
}

#[tokio::test]
async fn deleting_a_routine_drops_its_tasks_and_entries() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let routines = seed_routines(&habitual, &["Morning", "Evening"]).await;
    let task = habitual.new_task(routines[0].id, "Stretch").await.unwrap();
    habitual
        .cycle_entry(task.id, habitual.today())
        .await
        .unwrap();

    // Act
    habitual.delete_routine(routines[0].id).await.unwrap();

    // Assert
    assert!(habitual.get_task(task.id).await.is_err());
    assert!(habitual.entries(task.id).await.unwrap().is_empty());
    let left = habitual.list_routines().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].position, 0);
}
