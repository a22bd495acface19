use rusqlite::{params, OptionalExtension, Row};

use crate::db::models::User;
use crate::error::{AppError, AppResult};
use crate::state::DbPool;

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";

/// Insert a new user. A duplicate email surfaces as a validation failure,
/// everything else as a database error.
pub fn create_user(
    pool: &DbPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> AppResult<User> {
    let conn = pool.get()?;
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO users (id, name, email, password_hash) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, email, password_hash],
    )
    .map_err(|e| match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::Validation("Email is already registered".into())
        }
        _ => AppError::Database(e),
    })?;

    let user = conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
        params![id],
        row_to_user,
    )?;
    Ok(user)
}

pub fn find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<User>> {
    let conn = pool.get()?;
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
            params![email],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn find_by_id(pool: &DbPool, id: &str) -> AppResult<Option<User>> {
    let conn = pool.get()?;
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            params![id],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}
