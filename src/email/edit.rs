//! Email editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::Markup;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    email::{
        Email, EmailFormData,
        form::{EmailFormView, email_form_page, validate_email_form},
        get_email, update_email,
    },
    endpoints,
    record_id::RecordId,
    redirect::see_other,
    translation::{TranslationId, TranslationSlot, get_translations_for_email, initial_slots},
    validation::FieldErrors,
};

/// The state needed for editing an email.
#[derive(Debug, Clone)]
pub struct EditEmailState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditEmailState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

const PAGE_TITLE: &str = "Edit Email";

fn edit_email_form(
    action: &str,
    form: &EmailFormData,
    categories: &[Category],
    slots: &[TranslationSlot],
    errors: &FieldErrors,
) -> Markup {
    EmailFormView {
        action,
        submit_text: "Save email",
        name_eng: &form.name_eng,
        name_esp: &form.name_esp,
        category_id: &form.category_id,
        categories,
        slots,
        errors,
    }
    .into_html()
}

fn form_data_from_email(email: &Email) -> EmailFormData {
    EmailFormData {
        name_eng: email.name_eng.to_string(),
        name_esp: email.name_esp.to_string(),
        category_id: email
            .category_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        ..Default::default()
    }
}

/// Render the email editing page.
///
/// The form holds one slot per existing translation followed by blank slots
/// for adding new translations.
pub async fn get_edit_email_page(
    RecordId(email_id): RecordId,
    State(state): State<EditEmailState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let email = get_email(email_id, &connection)?;
    let translations = get_translations_for_email(email_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve translations: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let action = endpoints::format_endpoint(endpoints::EDIT_EMAIL_VIEW, email_id);
    let form = edit_email_form(
        &action,
        &form_data_from_email(&email),
        &categories,
        &initial_slots(&translations),
        &FieldErrors::new(),
    );

    Ok(email_form_page(PAGE_TITLE, &action, form).into_response())
}

/// Handle email update form submission.
///
/// Slots carrying a translation ID update that translation, or delete it when
/// the delete box is ticked. New slots with content add a translation and blank
/// new slots are ignored. The email and its translations are saved together or
/// not at all.
pub async fn update_email_endpoint(
    RecordId(email_id): RecordId,
    State(state): State<EditEmailState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<EmailFormData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_email(email_id, &connection)?;
    let existing_ids = get_translations_for_email(email_id, &connection)?
        .into_iter()
        .map(|translation| translation.id)
        .collect::<Vec<TranslationId>>();
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let slots = form.slots();

    let (new_email, changes) =
        match validate_email_form(&form, &slots, &categories, &existing_ids) {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(
                    "Rejected update to email {email_id} with {} field error(s)",
                    errors.len()
                );
                let action = endpoints::format_endpoint(endpoints::EDIT_EMAIL_VIEW, email_id);
                let form = edit_email_form(&action, &form, &categories, &slots, &errors);

                return Ok(if is_htmx {
                    form.into_response()
                } else {
                    email_form_page(PAGE_TITLE, &action, form).into_response()
                });
            }
        };

    let email = update_email(email_id, &new_email, &changes, &connection)
        .inspect_err(|error| tracing::error!("Could not update email {email_id}: {error}"))?;

    Ok(see_other(
        is_htmx,
        &endpoints::format_endpoint(endpoints::EMAIL_VIEW, email.id),
    ))
}
