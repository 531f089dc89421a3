//! The permission authority answers whether a user holds a permission.

use std::{
    collections::BTreeSet,
    fmt::Debug,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, UserID, permission::Permission};

/// Decides whether a user may perform an action.
///
/// The authority is injected into the app state so that handlers and the
/// permission guard never reach for global state.
pub trait PermissionAuthority: Debug + Send + Sync {
    /// Whether the user with `user_id` holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store could not be queried.
    fn has_permission(&self, user_id: UserID, permission: Permission) -> Result<bool, Error>;
}

/// A [PermissionAuthority] backed by the `user_permission` table.
#[derive(Debug, Clone)]
pub struct SQLitePermissionAuthority {
    db_connection: Arc<Mutex<Connection>>,
}

impl SQLitePermissionAuthority {
    /// Create an authority that reads grants through `db_connection`.
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }
}

impl PermissionAuthority for SQLitePermissionAuthority {
    fn has_permission(&self, user_id: UserID, permission: Permission) -> Result<bool, Error> {
        let connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM user_permission WHERE user_id = ?1 AND permission = ?2
                );",
                (user_id.as_i64(), permission.name()),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }
}

/// Give `permission` to the user with `user_id`.
///
/// Granting a permission the user already holds is a no-op.
pub fn grant_permission(
    user_id: UserID,
    permission: Permission,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT OR IGNORE INTO user_permission (user_id, permission) VALUES (?1, ?2);",
        (user_id.as_i64(), permission.name()),
    )?;

    Ok(())
}

/// Take `permission` away from the user with `user_id`.
///
/// Revoking a permission the user does not hold is a no-op.
pub fn revoke_permission(
    user_id: UserID,
    permission: Permission,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "DELETE FROM user_permission WHERE user_id = ?1 AND permission = ?2;",
        (user_id.as_i64(), permission.name()),
    )?;

    Ok(())
}

/// Get all the permissions held by the user with `user_id`.
pub fn get_permissions(
    user_id: UserID,
    connection: &Connection,
) -> Result<BTreeSet<Permission>, Error> {
    let names = connection
        .prepare("SELECT permission FROM user_permission WHERE user_id = :user_id;")?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            row.get::<_, String>(0)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    names.iter().map(|name| name.parse()).collect()
}

/// Initialize the user permission table.
///
/// The user table must exist before this is called.
pub fn create_permission_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_permission (
            user_id INTEGER NOT NULL,
            permission TEXT NOT NULL,
            PRIMARY KEY (user_id, permission),
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );",
    )?;

    Ok(())
}
