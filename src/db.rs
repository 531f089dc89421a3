//! Database setup shared by the record and user stores.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error,
    auth::create_user_table,
    category::create_category_table,
    email::create_email_table,
    permission::create_permission_table,
    translation::create_translation_table,
};

/// Enable foreign keys and create the application tables if they do not exist.
///
/// Foreign keys are off by default in SQLite, and the set-null rules on
/// `email.category_id` and `email_translation.email_id` depend on them.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_permission_table(&transaction)?;
    create_category_table(&transaction)?;
    create_email_table(&transaction)?;
    create_translation_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
