use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use super::preferences::write_preference;
use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime, parse_role},
    models::User,
};
use crate::preferences::PlannedWrite;

const USER_COLUMNS: &str = "id, name, admin_id, image_path, role, created_at";

fn row_to_user(row: &Row) -> Result<User> {
    let role: String = row.get("role")?;
    let created_at: String = row.get("created_at")?;

    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        admin_id: row.get("admin_id")?,
        image_path: row.get("image_path")?,
        role: parse_role(&role)?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

pub(super) fn insert_user_row(conn: &Connection, user: &User) -> Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, admin_id, image_path, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id,
            user.name,
            user.admin_id,
            user.image_path,
            user.role.as_str(),
            format_datetime(&user.created_at),
        ],
    )
    .with_context(|| format!("failed to insert user {}", user.id))?;
    Ok(())
}

impl Database {
    /// Insert a user together with their initial preferences in one transaction
    pub async fn insert_user_with_preferences(
        &self,
        user: User,
        preferences: Vec<PlannedWrite>,
    ) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            insert_user_row(&tx, &user)?;
            for write in &preferences {
                write_preference(&tx, write)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
            let mut rows = stmt.query(params![user_id])?;
            let user = match rows.next()? {
                Some(row) => Some(row_to_user(row)?),
                None => None,
            };
            Ok(user)
        })
        .await
    }

    pub async fn user_exists(&self, user_id: &str) -> Result<bool> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM users WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
    }

    /// Rename a user and merge planned preference writes in one transaction.
    /// The image path only changes when a new one is given.
    /// Returns false, writing nothing, when no such user exists.
    pub async fn update_user_profile(
        &self,
        user_id: &str,
        name: String,
        image_path: Option<String>,
        preferences: Vec<PlannedWrite>,
    ) -> Result<bool> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            let rows_affected = tx
                .execute(
                    "UPDATE users
                     SET name = ?1,
                         image_path = COALESCE(?2, image_path)
                     WHERE id = ?3",
                    params![name, image_path, user_id],
                )
                .with_context(|| format!("failed to update user {user_id}"))?;
            if rows_affected == 0 {
                return Ok(false);
            }

            for write in &preferences {
                write_preference(&tx, write)?;
            }
            tx.commit()?;
            Ok(true)
        })
        .await
    }

    /// Household members, owner first, then by name
    pub async fn list_users_for_admin(&self, admin_id: &str) -> Result<Vec<User>> {
        let admin_id = admin_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS}
                 FROM users
                 WHERE admin_id = ?1
                 ORDER BY CASE WHEN role = 'owner' THEN 0 ELSE 1 END, name ASC"
            ))?;

            let mut rows = stmt.query(params![admin_id])?;
            let mut users = Vec::new();
            while let Some(row) = rows.next()? {
                users.push(row_to_user(row)?);
            }

            Ok(users)
        })
        .await
    }
}
