//! Category editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::Markup;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        CategoryFormData, CategoryName,
        form::{category_form_page, category_form_view},
        get_category, update_category,
    },
    endpoints,
    record_id::RecordId,
    redirect::see_other,
};

/// The state needed for editing a category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

const PAGE_TITLE: &str = "Edit Category";

fn edit_category_form(action: &str, name: &str, error: &str) -> Markup {
    category_form_view(action, "Save category", name, error)
}

/// Render the category editing page.
pub async fn get_edit_category_page(
    RecordId(category_id): RecordId,
    State(state): State<EditCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(category_id, &connection)?;
    let action = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let form = edit_category_form(&action, category.name.as_ref(), "");

    Ok(category_form_page(PAGE_TITLE, &action, form).into_response())
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    RecordId(category_id): RecordId,
    State(state): State<EditCategoryState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<CategoryFormData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    // A missing category is a 404 even when the submitted name is invalid.
    get_category(category_id, &connection)?;

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            let action = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
            let form = edit_category_form(&action, &form.name, &error.to_string());

            return Ok(if is_htmx {
                form.into_response()
            } else {
                category_form_page(PAGE_TITLE, &action, form).into_response()
            });
        }
    };

    update_category(category_id, name, &connection).inspect_err(|error| {
        tracing::error!("Could not update category {category_id}: {error}")
    })?;

    Ok(see_other(is_htmx, endpoints::CATEGORIES_VIEW))
}
