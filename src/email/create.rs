//! Email creation page and endpoint.

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
        EmailFormData, create_email,
        form::{EmailFormView, email_form_page, validate_email_form},
    },
    endpoints,
    redirect::see_other,
    translation::{TranslationSlot, initial_slots},
    validation::FieldErrors,
};

/// The state needed for creating an email.
#[derive(Debug, Clone)]
pub struct CreateEmailState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateEmailState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

const PAGE_TITLE: &str = "New Email";

fn new_email_form(
    form: &EmailFormData,
    categories: &[Category],
    slots: &[TranslationSlot],
    errors: &FieldErrors,
) -> Markup {
    EmailFormView {
        action: endpoints::NEW_EMAIL_VIEW,
        submit_text: "Create email",
        name_eng: &form.name_eng,
        name_esp: &form.name_esp,
        category_id: &form.category_id,
        categories,
        slots,
        errors,
    }
    .into_html()
}

/// Render the email creation page with a blank form and blank translation slots.
pub async fn get_new_email_page(State(state): State<CreateEmailState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let form = new_email_form(
        &EmailFormData::default(),
        &categories,
        &initial_slots(&[]),
        &FieldErrors::new(),
    );

    Ok(email_form_page(PAGE_TITLE, endpoints::NEW_EMAIL_VIEW, form).into_response())
}

/// Handle email creation form submission.
///
/// On success the client is sent to the new email's page. Invalid input
/// re-renders the form with the submitted values and inline errors: the whole
/// page for a plain form post, just the form for HTMX.
pub async fn create_email_endpoint(
    State(state): State<CreateEmailState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<EmailFormData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let slots = form.slots();

    let (new_email, changes) = match validate_email_form(&form, &slots, &categories, &[]) {
        Ok(valid) => valid,
        Err(errors) => {
            tracing::debug!("Rejected new email with {} field error(s)", errors.len());
            let form = new_email_form(&form, &categories, &slots, &errors);

            return Ok(if is_htmx {
                form.into_response()
            } else {
                email_form_page(PAGE_TITLE, endpoints::NEW_EMAIL_VIEW, form).into_response()
            });
        }
    };

    let email = create_email(&new_email, &changes.saved, &connection)
        .inspect_err(|error| tracing::error!("Could not create email: {error}"))?;
    tracing::info!(
        "Created email {} with {} translation(s)",
        email.id,
        changes.saved.len()
    );

    Ok(see_other(
        is_htmx,
        &endpoints::format_endpoint(endpoints::EMAIL_VIEW, email.id),
    ))
}
