//! SQLite UserRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::utils::{
    current_timestamp, format_date, format_time, parse_date, parse_datetime, parse_time,
};
use crate::db::{DbError, DbResult, Id, NewUser, User, UserRepository};

const SELECT_USER: &str =
    "SELECT id, username, email, birthday, login_time, created_at, updated_at FROM users";

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_user(row: &SqliteRow) -> DbResult<User> {
    let birthday: Option<String> = row.try_get("birthday")?;
    let login_time: Option<String> = row.try_get("login_time")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        birthday: birthday
            .map(|raw| parse_date("birthday", &raw))
            .transpose()?,
        login_time: login_time
            .map(|raw| parse_time("login_time", &raw))
            .transpose()?,
        created_at: parse_datetime("created_at", &created_at)?,
        updated_at: parse_datetime("updated_at", &updated_at)?,
    })
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn list(&self) -> DbResult<Vec<User>> {
        let rows = sqlx::query(&format!("{} ORDER BY id ASC", SELECT_USER))
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get(&self, id: Id) -> DbResult<User> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_USER))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "User".to_string(),
            id: id.to_string(),
        })?;

        row_to_user(&row)
    }

    async fn create(&self, user: &NewUser) -> DbResult<User> {
        // Timestamps are always generated here, never taken from input
        let created_at = current_timestamp();

        let result = sqlx::query(
            "INSERT INTO users (username, email, birthday, login_time, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.birthday.as_ref().map(format_date))
        .bind(user.login_time.as_ref().map(format_time))
        .bind(&created_at)
        .bind(&created_at)
        .execute(self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                DbError::AlreadyExists {
                    entity_type: "User".to_string(),
                    id: user.username.clone(),
                }
            } else {
                DbError::from(e)
            }
        })?;

        self.get(result.last_insert_rowid()).await
    }
}
