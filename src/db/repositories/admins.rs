use anyhow::{Context, Result};
use rusqlite::{params, Row};

use super::{preferences::write_preference, users::insert_user_row};
use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime},
    models::{Admin, User},
};
use crate::preferences::PlannedWrite;

fn row_to_admin(row: &Row) -> Result<Admin> {
    let created_at: String = row.get("created_at")?;

    Ok(Admin {
        id: row.get("id")?,
        name: row.get("name")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        house_address: row.get("house_address")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Create a household: the admin row, its owner user and the owner's
    /// preferences, all in one transaction.
    /// Returns false, writing nothing, if the username is already registered.
    pub async fn create_household(
        &self,
        admin: Admin,
        owner: User,
        preferences: Vec<PlannedWrite>,
    ) -> Result<bool> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let taken: i64 = tx.query_row(
                "SELECT COUNT(*) FROM admins WHERE username = ?1",
                params![admin.username],
                |row| row.get(0),
            )?;
            if taken > 0 {
                return Ok(false);
            }

            tx.execute(
                "INSERT INTO admins (id, name, username, password_hash, house_address, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    admin.id,
                    admin.name,
                    admin.username,
                    admin.password_hash,
                    admin.house_address,
                    format_datetime(&admin.created_at),
                ],
            )
            .with_context(|| "failed to insert admin")?;

            insert_user_row(&tx, &owner)?;
            for write in &preferences {
                write_preference(&tx, write)?;
            }

            tx.commit().context("failed to commit household")?;
            Ok(true)
        })
        .await
    }

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let username = username.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, username, password_hash, house_address, created_at
                 FROM admins
                 WHERE username = ?1",
            )?;

            let mut rows = stmt.query(params![username])?;
            let admin = match rows.next()? {
                Some(row) => Some(row_to_admin(row)?),
                None => None,
            };
            Ok(admin)
        })
        .await
    }

    pub async fn admin_exists(&self, admin_id: &str) -> Result<bool> {
        let admin_id = admin_id.to_string();
        self.execute(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM admins WHERE id = ?1",
                params![admin_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
    }
}
