// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Transactional rewrites of a dense `position` column.

use sqlx::{SqliteConnection, SqlitePool};

use crate::position::{PositionError, SENTINEL, Scope, decode_sql, encode_sql};

/// Moves row `id` from `start` to `end`, shifting the rows in between by one
/// towards the vacated slot. Atomic: on error nothing is written.
pub async fn reorder(
    pool: &SqlitePool,
    scope: Scope,
    id: i64,
    start: i64,
    end: i64,
) -> Result<(), PositionError> {
    if start == end {
        tracing::debug!(%scope, id, start, "reorder to same position, nothing to do");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    let result = match reorder_in(&mut tx, scope, id, start, end).await {
        Ok(()) => tx.commit().await.map_err(PositionError::from),
        Err(e) => Err(e), // dropping the transaction rolls it back
    };

    match result {
        Ok(()) => {
            tracing::debug!(%scope, id, start, end, "reordered");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%scope, id, start, end, err = %e, "reorder failed, rolled back");
            Err(e)
        }
    }
}

async fn reorder_in(
    conn: &mut SqliteConnection,
    scope: Scope,
    id: i64,
    start: i64,
    end: i64,
) -> Result<(), PositionError> {
    let table = scope.table();
    let condition = scope.condition();

    // 1. park the moved row on the sentinel
    let sql = format!("UPDATE {table} SET position = ? WHERE id = ? AND position = ?{condition}");
    let parked = scope
        .bind(sqlx::query(&sql).bind(SENTINEL).bind(id).bind(start))
        .execute(&mut *conn)
        .await?;
    if parked.rows_affected() != 1 {
        return Err(PositionError::PositionMismatch {
            id,
            expected: start,
        });
    }

    // 2. shift the rows in between, encoded
    let (sql, low, high) = if start < end {
        let shifted = encode_sql("position - 1");
        let sql = format!(
            "UPDATE {table} SET position = {shifted} WHERE position > ? AND position <= ?{condition}"
        );
        (sql, start, end)
    } else {
        let shifted = encode_sql("position + 1");
        let sql = format!(
            "UPDATE {table} SET position = {shifted} WHERE position >= ? AND position < ?{condition}"
        );
        (sql, end, start)
    };
    scope
        .bind(sqlx::query(&sql).bind(low).bind(high))
        .execute(&mut *conn)
        .await?;

    // 3. drop the moved row into its slot
    let sql = format!("UPDATE {table} SET position = ? WHERE id = ?");
    sqlx::query(&sql)
        .bind(end)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    // 4. bring the shifted rows back
    decode_parked(conn, scope).await
}

/// Deletes row `id` and closes the gap it leaves. Atomic: on error nothing is
/// written.
pub async fn delete(pool: &SqlitePool, scope: Scope, id: i64) -> Result<(), PositionError> {
    let mut tx = pool.begin().await?;
    let result = match delete_in(&mut tx, scope, id).await {
        Ok(position) => tx.commit().await.map(|()| position).map_err(PositionError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(position) => {
            tracing::debug!(%scope, id, position, "deleted");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%scope, id, err = %e, "delete failed, rolled back");
            Err(e)
        }
    }
}

async fn delete_in(
    conn: &mut SqliteConnection,
    scope: Scope,
    id: i64,
) -> Result<i64, PositionError> {
    let table = scope.table();
    let condition = scope.condition();

    let sql = format!("SELECT position FROM {table} WHERE id = ?{condition}");
    let position: i64 = scope
        .bind_scalar(sqlx::query_scalar(&sql).bind(id))
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(PositionError::NotFound(id))?;

    let sql = format!("DELETE FROM {table} WHERE id = ?");
    sqlx::query(&sql).bind(id).execute(&mut *conn).await?;

    let shifted = encode_sql("position - 1");
    let sql = format!("UPDATE {table} SET position = {shifted} WHERE position > ?{condition}");
    scope
        .bind(sqlx::query(&sql).bind(position))
        .execute(&mut *conn)
        .await?;

    decode_parked(conn, scope).await?;
    Ok(position)
}

/// Position a new row appended to `scope` gets.
pub async fn next_position(
    conn: &mut SqliteConnection,
    scope: Scope,
) -> Result<i64, PositionError> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE position >= 0{}",
        scope.table(),
        scope.condition()
    );
    let count: i64 = scope
        .bind_scalar(sqlx::query_scalar(&sql))
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

async fn decode_parked(conn: &mut SqliteConnection, scope: Scope) -> Result<(), PositionError> {
    let restored = decode_sql("position");
    let sql = format!(
        "UPDATE {} SET position = {restored} WHERE position <= -2{}",
        scope.table(),
        scope.condition()
    );
    scope.bind(sqlx::query(&sql)).execute(&mut *conn).await?;
    Ok(())
}
