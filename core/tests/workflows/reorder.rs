// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Drag-and-drop results persisted through the store.

use crate::common::{names, seed_routines, setup_habitual, setup_temp_dirs};

#[tokio::test]
async fn reorder_first_to_last_refetches_new_order() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    seed_routines(&habitual, &["A", "B", "C"]).await;

    // Act: the drop callback reported (0, 2)
    let routines = habitual.move_routine(0, 2).await.expect("Failed to move");

    // Assert
    assert_eq!(names(&routines), vec!["B", "C", "A"]);
    let positions: Vec<i64> = routines.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[tokio::test]
async fn reorder_to_same_index_changes_nothing() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let before = seed_routines(&habitual, &["A", "B", "C"]).await;

    // Act
    let after = habitual.move_routine(1, 1).await.expect("Failed to move");

    // Assert
    assert_eq!(after, before);
}

#[tokio::test]
async fn reorder_tasks_within_one_routine() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let routines = seed_routines(&habitual, &["Morning", "Evening"]).await;
    let (morning, evening) = (routines[0].id, routines[1].id);
    for name in ["Stretch", "Water", "Journal", "Walk", "Plan"] {
        habitual.new_task(morning, name).await.unwrap();
    }
    habitual.new_task(evening, "Read").await.unwrap();

    // Act
    habitual.move_task(morning, 2, 4).await.expect("Failed to move");
    let tasks = habitual.move_task(morning, 4, 1).await.expect("Failed to move");

    // Assert
    let order: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(order, vec!["Stretch", "Journal", "Water", "Walk", "Plan"]);
    let evening_tasks = habitual.list_tasks(evening).await.unwrap();
    assert_eq!(evening_tasks.len(), 1);
    assert_eq!(evening_tasks[0].position, 0);
}

#[tokio::test]
async fn delete_then_append_keeps_positions_dense() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let routines = seed_routines(&habitual, &["A", "B", "C", "D"]).await;

    // Act
    habitual.delete_routine(routines[1].id).await.unwrap();
    habitual.move_routine(2, 0).await.unwrap();
    habitual.new_routine("E").await.unwrap();

    // Assert
    let all = habitual.list_all_routines().await.unwrap();
    assert_eq!(names(&all), vec!["D", "A", "C", "E"]);
    let positions: Vec<i64> = all.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn move_with_stale_index_fails_without_changes() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let before = seed_routines(&habitual, &["A", "B"]).await;

    // Act
    let result = habitual.move_routine(5, 0).await;

    // Assert
    assert!(result.is_err());
    assert_eq!(habitual.list_routines().await.unwrap(), before);
}
