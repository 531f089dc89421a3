//! Category creation page and endpoint.

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
        CategoryFormData, CategoryName, create_category,
        form::{category_form_page, category_form_view},
    },
    endpoints,
    redirect::see_other,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

const PAGE_TITLE: &str = "New Category";

fn new_category_form(name: &str, error: &str) -> Markup {
    category_form_view(endpoints::NEW_CATEGORY_VIEW, "Create category", name, error)
}

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    category_form_page(
        PAGE_TITLE,
        endpoints::NEW_CATEGORY_VIEW,
        new_category_form("", ""),
    )
    .into_response()
}

/// Handle category creation form submission.
///
/// A new category sends the client on to the email list, where the category
/// is usually needed next.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<CategoryFormData>,
) -> Result<Response, Error> {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            let form = new_category_form(&form.name, &error.to_string());

            return Ok(if is_htmx {
                form.into_response()
            } else {
                category_form_page(PAGE_TITLE, endpoints::NEW_CATEGORY_VIEW, form).into_response()
            });
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = create_category(name, &connection)
        .inspect_err(|error| tracing::error!("Could not create category: {error}"))?;
    tracing::info!("Created category {}", category.id);

    Ok(see_other(is_htmx, endpoints::EMAILS_VIEW))
}
