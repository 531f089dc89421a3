//! The page showing one category and the emails grouped under it.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID,
    category::{Category, get_category},
    email::{Email, get_emails_in_category},
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link, page_header},
    navigation::NavBar,
    permission::{Permission, PermissionAuthority},
    record_id::RecordId,
};

/// The state needed for the category detail page.
#[derive(Debug, Clone)]
pub struct CategoryPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub permission_authority: Arc<dyn PermissionAuthority>,
}

impl FromRef<AppState> for CategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            permission_authority: state.permission_authority.clone(),
        }
    }
}

/// Render a category with links to its emails.
///
/// The edit link is only shown to users who may change categories.
pub async fn get_category_page(
    RecordId(category_id): RecordId,
    State(state): State<CategoryPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    // The authority may share the database connection, so ask before locking it.
    let can_edit = state
        .permission_authority
        .has_permission(user_id, Permission::ChangeCategory)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(category_id, &connection)?;
    let emails = get_emails_in_category(category_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve emails: {error}"))?;

    Ok(category_view(&category, &emails, can_edit).into_response())
}

fn category_view(category: &Category, emails: &[Email], can_edit: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORY_VIEW).into_html();
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);
    let edit_action = can_edit.then_some(("edit-category", edit_url.as_str(), "Edit category"));

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_header(category.name.as_ref(), edit_action))

            section class="w-full max-w-screen-lg space-y-2"
            {
                h2 class="text-lg font-semibold" { "Emails" }

                @if emails.is_empty() {
                    p class="text-gray-500 dark:text-gray-400" { "No emails in this category." }
                } @else {
                    ul id="category-emails" class="list-disc list-inside"
                    {
                        @for email in emails {
                            li
                            {
                                (link(
                                    &endpoints::format_endpoint(endpoints::EMAIL_VIEW, email.id),
                                    email.name_eng.as_ref(),
                                ))
                            }
                        }
                    }
                }
            }
        }
    };

    base(category.name.as_ref(), &content)
}
