//! Database operations for email translations.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    email::EmailId,
    translation::{EmailTranslation, Language, TranslationId},
};

/// Add a translation to the email with `email_id`.
pub fn create_translation(
    email_id: EmailId,
    language: Language,
    content: &str,
    connection: &Connection,
) -> Result<EmailTranslation, Error> {
    connection.execute(
        "INSERT INTO email_translation (email_id, language, content) VALUES (?1, ?2, ?3);",
        (email_id, language, content),
    )?;

    Ok(EmailTranslation {
        id: connection.last_insert_rowid(),
        email_id: Some(email_id),
        language,
        content: content.to_owned(),
    })
}

/// Replace the language and content of a translation belonging to `email_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if `translation_id` does not exist or belongs to
/// another email.
pub fn update_translation(
    translation_id: TranslationId,
    email_id: EmailId,
    language: Language,
    content: &str,
    connection: &Connection,
) -> Result<EmailTranslation, Error> {
    let rows_affected = connection.execute(
        "UPDATE email_translation SET language = ?1, content = ?2 WHERE id = ?3 AND email_id = ?4;",
        (language, content, translation_id, email_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(EmailTranslation {
        id: translation_id,
        email_id: Some(email_id),
        language,
        content: content.to_owned(),
    })
}

/// Remove a translation belonging to `email_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if `translation_id` does not exist or belongs to
/// another email.
pub fn delete_translation(
    translation_id: TranslationId,
    email_id: EmailId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM email_translation WHERE id = ?1 AND email_id = ?2;",
        (translation_id, email_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get the translations of one email in the order they were created.
pub fn get_translations_for_email(
    email_id: EmailId,
    connection: &Connection,
) -> Result<Vec<EmailTranslation>, Error> {
    connection
        .prepare(
            "SELECT id, email_id, language, content FROM email_translation
            WHERE email_id = :email_id ORDER BY id ASC;",
        )?
        .query_map(&[(":email_id", &email_id)], map_row)?
        .map(|maybe_translation| maybe_translation.map_err(|error| error.into()))
        .collect()
}

/// Get the number of translations in the database, including orphaned ones.
pub fn count_email_translations(connection: &Connection) -> Result<usize, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM email_translation;",
        [],
        |row| row.get(0),
    )?;

    Ok(usize::try_from(count).unwrap_or_default())
}

/// Initialize the email translation table.
///
/// Must run after the email table is created.
pub fn create_translation_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS email_translation (
            id INTEGER PRIMARY KEY,
            email_id INTEGER REFERENCES email(id) ON DELETE SET NULL,
            language TEXT NOT NULL DEFAULT 'EN'
                CHECK (language IN ('EN', 'FR', 'ES', 'DE', 'NE', 'IT')),
            content TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_email_translation_email_id
            ON email_translation(email_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<EmailTranslation, rusqlite::Error> {
    Ok(EmailTranslation {
        id: row.get(0)?,
        email_id: row.get(1)?,
        language: row.get(2)?,
        content: row.get(3)?,
    })
}

#[cfg(test)]
mod translation_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        email::{EmailName, NewEmail, create_email},
        translation::Language,
    };

    use super::{
        count_email_translations, create_translation, delete_translation,
        get_translations_for_email, update_translation,
    };

    fn get_connection_with_email() -> (Connection, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let email = create_email(
            &NewEmail {
                name_eng: EmailName::new_unchecked("Welcome"),
                name_esp: EmailName::new_unchecked("Bienvenido"),
                category_id: None,
            },
            &[],
            &connection,
        )
        .unwrap();

        (connection, email.id)
    }

    #[test]
    fn create_translation_references_email() {
        let (connection, email_id) = get_connection_with_email();

        let translation =
            create_translation(email_id, Language::Spanish, "Hola", &connection).unwrap();

        assert_eq!(translation.email_id, Some(email_id));
        assert_eq!(
            get_translations_for_email(email_id, &connection),
            Ok(vec![translation])
        );
    }

    #[test]
    fn translations_are_ordered_by_id() {
        let (connection, email_id) = get_connection_with_email();
        let first = create_translation(email_id, Language::Italian, "Ciao", &connection).unwrap();
        let second = create_translation(email_id, Language::French, "Salut", &connection).unwrap();

        let got = get_translations_for_email(email_id, &connection).unwrap();

        assert_eq!(got, vec![first, second]);
    }

    #[test]
    fn update_translation_changes_content() {
        let (connection, email_id) = get_connection_with_email();
        let translation =
            create_translation(email_id, Language::English, "Hi", &connection).unwrap();

        let updated =
            update_translation(translation.id, email_id, Language::German, "Hallo", &connection)
                .unwrap();

        assert_eq!(updated.language, Language::German);
        assert_eq!(
            get_translations_for_email(email_id, &connection),
            Ok(vec![updated])
        );
    }

    #[test]
    fn update_translation_of_other_email_fails() {
        let (connection, email_id) = get_connection_with_email();
        let translation =
            create_translation(email_id, Language::English, "Hi", &connection).unwrap();

        let result = update_translation(
            translation.id,
            email_id + 1,
            Language::English,
            "Hijacked",
            &connection,
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_translation_removes_row() {
        let (connection, email_id) = get_connection_with_email();
        let kept = create_translation(email_id, Language::English, "Hi", &connection).unwrap();
        let removed =
            create_translation(email_id, Language::Spanish, "Hola", &connection).unwrap();

        delete_translation(removed.id, email_id, &connection).unwrap();

        assert_eq!(
            get_translations_for_email(email_id, &connection),
            Ok(vec![kept])
        );
    }

    #[test]
    fn delete_translation_of_other_email_fails() {
        let (connection, email_id) = get_connection_with_email();
        let translation =
            create_translation(email_id, Language::English, "Hi", &connection).unwrap();

        let result = delete_translation(translation.id, email_id + 1, &connection);

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(count_email_translations(&connection), Ok(1));
    }

    #[test]
    fn count_translations() {
        let (connection, email_id) = get_connection_with_email();
        create_translation(email_id, Language::English, "Hi", &connection).unwrap();
        create_translation(email_id, Language::Spanish, "Hola", &connection).unwrap();

        assert_eq!(count_email_translations(&connection), Ok(2));
    }

    #[test]
    fn language_outside_enum_is_rejected_by_store() {
        let (connection, email_id) = get_connection_with_email();

        let result = connection.execute(
            "INSERT INTO email_translation (email_id, language, content) VALUES (?1, 'XX', 'x')",
            (email_id,),
        );

        assert!(result.is_err());
    }

    #[test]
    fn deleting_email_clears_translation_reference() {
        let (connection, email_id) = get_connection_with_email();
        create_translation(email_id, Language::English, "Hi", &connection).unwrap();

        connection
            .execute("DELETE FROM email WHERE id = ?1", (email_id,))
            .unwrap();

        let orphaned: Option<i64> = connection
            .query_row("SELECT email_id FROM email_translation", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphaned, None);
        assert_eq!(count_email_translations(&connection), Ok(1));
    }
}
