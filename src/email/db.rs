//! Database operations for emails.
//!
//! [create_email] and [update_email] write an email and its batch of
//! translations in one transaction, so either all rows are written or none.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::CategoryId,
    email::{Email, EmailId, EmailName, NewEmail},
    translation::{
        TranslationChanges, ValidTranslation, create_translation, delete_translation,
        update_translation,
    },
};

/// Create an email with its translations.
///
/// Every translation is added to the new email, so any translation ID is
/// ignored. Nothing is written if any statement fails.
pub fn create_email(
    new_email: &NewEmail,
    translations: &[ValidTranslation],
    connection: &Connection,
) -> Result<Email, Error> {
    let transaction = connection.unchecked_transaction()?;

    let email = create_email_row(new_email, &transaction)?;

    for translation in translations {
        create_translation(
            email.id,
            translation.language,
            &translation.content,
            &transaction,
        )?;
    }

    transaction.commit()?;

    Ok(email)
}

/// Update an email's fields and apply the translation changes: existing
/// translations are updated or deleted and new ones are added.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no email with `email_id` or a
/// translation ID does not belong to it. Nothing is written if any statement fails.
pub fn update_email(
    email_id: EmailId,
    new_email: &NewEmail,
    changes: &TranslationChanges,
    connection: &Connection,
) -> Result<Email, Error> {
    let transaction = connection.unchecked_transaction()?;

    let email = update_email_row(email_id, new_email, &transaction)?;

    for translation_id in &changes.deleted {
        delete_translation(*translation_id, email.id, &transaction)?;
    }

    for translation in &changes.saved {
        match translation.id {
            Some(translation_id) => update_translation(
                translation_id,
                email.id,
                translation.language,
                &translation.content,
                &transaction,
            )?,
            None => create_translation(
                email.id,
                translation.language,
                &translation.content,
                &transaction,
            )?,
        };
    }

    transaction.commit()?;

    Ok(email)
}

fn create_email_row(new_email: &NewEmail, connection: &Connection) -> Result<Email, Error> {
    connection.execute(
        "INSERT INTO email (name_eng, name_esp, category_id) VALUES (?1, ?2, ?3);",
        (
            new_email.name_eng.as_ref(),
            new_email.name_esp.as_ref(),
            new_email.category_id,
        ),
    )?;

    Ok(Email {
        id: connection.last_insert_rowid(),
        name_eng: new_email.name_eng.clone(),
        name_esp: new_email.name_esp.clone(),
        category_id: new_email.category_id,
    })
}

fn update_email_row(
    email_id: EmailId,
    new_email: &NewEmail,
    connection: &Connection,
) -> Result<Email, Error> {
    let rows_affected = connection.execute(
        "UPDATE email SET name_eng = ?1, name_esp = ?2, category_id = ?3 WHERE id = ?4;",
        (
            new_email.name_eng.as_ref(),
            new_email.name_esp.as_ref(),
            new_email.category_id,
            email_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(Email {
        id: email_id,
        name_eng: new_email.name_eng.clone(),
        name_esp: new_email.name_esp.clone(),
        category_id: new_email.category_id,
    })
}

/// Retrieve a single email by ID.
pub fn get_email(email_id: EmailId, connection: &Connection) -> Result<Email, Error> {
    connection
        .prepare("SELECT id, name_eng, name_esp, category_id FROM email WHERE id = :id;")?
        .query_row(&[(":id", &email_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all emails in the order they were created.
pub fn get_all_emails(connection: &Connection) -> Result<Vec<Email>, Error> {
    connection
        .prepare("SELECT id, name_eng, name_esp, category_id FROM email ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_email| maybe_email.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the emails grouped under one category.
pub fn get_emails_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<Email>, Error> {
    connection
        .prepare(
            "SELECT id, name_eng, name_esp, category_id FROM email
            WHERE category_id = :category_id ORDER BY id ASC;",
        )?
        .query_map(&[(":category_id", &category_id)], map_row)?
        .map(|maybe_email| maybe_email.map_err(|error| error.into()))
        .collect()
}

/// Get the number of emails in the database.
pub fn count_emails(connection: &Connection) -> Result<usize, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM email;", [], |row| row.get(0))?;

    Ok(usize::try_from(count).unwrap_or_default())
}

/// Initialize the email table.
///
/// Must run after the category table is created.
pub fn create_email_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS email (
            id INTEGER PRIMARY KEY,
            name_eng TEXT NOT NULL,
            name_esp TEXT NOT NULL,
            category_id INTEGER REFERENCES category(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_email_category_id ON email(category_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Email, rusqlite::Error> {
    let raw_name_eng: String = row.get(1)?;
    let raw_name_esp: String = row.get(2)?;

    Ok(Email {
        id: row.get(0)?,
        name_eng: EmailName::new_unchecked(&raw_name_eng),
        name_esp: EmailName::new_unchecked(&raw_name_esp),
        category_id: row.get(3)?,
    })
}
