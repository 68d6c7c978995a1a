// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod entries;
mod renumber;
mod routines;
mod tasks;


use std::error::Error;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use crate::localdb::entries::Entries;
pub use crate::localdb::routines::{RoutineRecord, Routines};
pub use crate::localdb::tasks::{TaskRecord, Tasks};

/// Distinguishes the in-memory databases of one process.
#[cfg(test)]
pub(crate) static IN_MEMORY_DB_COUNTER: std::sync::atomic::AtomicU64 =
    std::sync::atomic::AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub routines: Routines,
    pub tasks: Tasks,
    pub entries: Entries,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let pool = match filename {
            Some(filename) => {
                tracing::info!(path = %filename.display(), "connecting to SQLite database");
                let options = SqliteConnectOptions::new()
                    .filename(filename.to_str().ok_or("Invalid path encoding")?)
                    .foreign_keys(true)
                    .create_if_missing(true);
                SqlitePoolOptions::new().connect_with(options).await
            }
            None => {
                tracing::info!("connecting to in-memory SQLite database");
                let options = SqliteConnectOptions::new()
                    .in_memory(true)
                    .foreign_keys(true);

                // every connection would get its own empty database, keep exactly one alive
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        tracing::debug!("ensuring tables in the database");
        Ok(LocalDb {
            routines: Routines::new(pool.clone()),
            tasks: Tasks::new(pool.clone()),
            entries: Entries::new(pool.clone()),
            pool,
        })
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
