// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Items hidden for the day.

use jiff::ToSpan;

use crate::common::{names, seed_routines, setup_habitual, setup_temp_dirs};

#[tokio::test]
async fn hidden_routine_comes_back_the_next_day() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let mut habitual = setup_habitual(&temp_dirs.state_dir).await;
    let routines = seed_routines(&habitual, &["A", "B", "C"]).await;

    // Act
    habitual.hide_routine(routines[1].id).await.unwrap();
    let today = habitual.list_routines().await.unwrap();
    let tomorrow = habitual.today().checked_add(1.day()).unwrap();
    habitual.set_today(tomorrow);
    let next_day = habitual.list_routines().await.unwrap();

    // Assert
    assert_eq!(names(&today), vec!["A", "C"]);
    assert_eq!(names(&next_day), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn unhide_all_tasks_restores_the_routine_list() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    let routine = seed_routines(&habitual, &["Morning"]).await[0].id;
    let stretch = habitual.new_task(routine, "Stretch").await.unwrap();
    let water = habitual.new_task(routine, "Water").await.unwrap();
    habitual.hide_task(stretch.id).await.unwrap();
    habitual.hide_task(water.id).await.unwrap();
    assert!(habitual.list_tasks(routine).await.unwrap().is_empty());

    // Act
    let shown = habitual.unhide_all_tasks(routine).await.unwrap();

    // Assert
    assert_eq!(shown, 2);
    assert_eq!(habitual.list_tasks(routine).await.unwrap().len(), 2);
}

#[tokio::test]
async fn hiding_a_missing_routine_is_an_error() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;

    // Act
    let result = habitual.hide_routine(404).await;

    // Assert
    assert_eq!(result.unwrap_err().to_string(), "Item 404 not found");
}
