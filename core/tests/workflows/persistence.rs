// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The database file outlives the store.

use crate::common::{names, seed_routines, setup_habitual, setup_temp_dirs};

#[tokio::test]
async fn state_dir_and_database_are_created() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    assert!(!temp_dirs.state_dir.exists());

    // Act
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    habitual.close().await.unwrap();

    // Assert
    assert!(temp_dirs.db_path().exists());
}

#[tokio::test]
async fn order_survives_reopen() {
    // Arrange
    let temp_dirs = setup_temp_dirs().unwrap();
    let habitual = setup_habitual(&temp_dirs.state_dir).await;
    seed_routines(&habitual, &["A", "B", "C"]).await;
    habitual.move_routine(2, 0).await.unwrap();
    habitual.close().await.unwrap();

    // Act
    let reopened = setup_habitual(&temp_dirs.state_dir).await;
    let routines = reopened.list_routines().await.unwrap();

    // Assert
    assert_eq!(names(&routines), vec!["C", "A", "B"]);
}
