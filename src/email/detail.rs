//! The page showing one email with its translations.

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
    email::{Email, get_email},
    endpoints,
    html::{CATEGORY_BADGE_STYLE, PAGE_CONTAINER_STYLE, base, link, page_header},
    navigation::NavBar,
    permission::{Permission, PermissionAuthority},
    record_id::RecordId,
    translation::{EmailTranslation, get_translations_for_email},
};

/// The state needed for the email detail page.
#[derive(Debug, Clone)]
pub struct EmailPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub permission_authority: Arc<dyn PermissionAuthority>,
}

impl FromRef<AppState> for EmailPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            permission_authority: state.permission_authority.clone(),
        }
    }
}

/// Render an email's names, category and translations.
///
/// The edit link is only shown to users who may change emails. Viewing and
/// changing are separate permissions, so holding one says nothing about the other.
pub async fn get_email_page(
    RecordId(email_id): RecordId,
    State(state): State<EmailPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    // The authority may share the database connection, so ask before locking it.
    let can_edit = state
        .permission_authority
        .has_permission(user_id, Permission::ChangeEmail)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let email = get_email(email_id, &connection)?;
    let category = match email.category_id {
        Some(category_id) => Some(get_category(category_id, &connection)?),
        None => None,
    };
    let translations = get_translations_for_email(email_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve translations: {error}"))?;

    Ok(email_view(&email, category.as_ref(), &translations, can_edit).into_response())
}

fn email_view(
    email: &Email,
    category: Option<&Category>,
    translations: &[EmailTranslation],
    can_edit: bool,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EMAIL_VIEW).into_html();
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_EMAIL_VIEW, email.id);
    let edit_action = can_edit.then_some(("edit-email", edit_url.as_str(), "Edit email"));

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_header(email.name_eng.as_ref(), edit_action))

            section class="w-full max-w-screen-lg space-y-4"
            {
                dl class="grid grid-cols-2 gap-2"
                {
                    dt class="font-semibold" { "Email name in English" }
                    dd id="name-eng" { (email.name_eng) }

                    dt class="font-semibold" { "Email name in Spanish" }
                    dd id="name-esp" { (email.name_esp) }

                    dt class="font-semibold" { "Category" }
                    dd id="category"
                    {
                        @match category {
                            Some(category) => {
                                span class=(CATEGORY_BADGE_STYLE)
                                {
                                    (link(
                                        &endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category.id),
                                        category.name.as_ref(),
                                    ))
                                }
                            }
                            None => { "No category" }
                        }
                    }
                }

                h2 class="text-lg font-semibold" { "Translations" }

                @if translations.is_empty() {
                    p class="text-gray-500 dark:text-gray-400" { "No translations yet." }
                }

                @for translation in translations {
                    article class="translation p-4 rounded border border-gray-200 dark:border-gray-700"
                    {
                        h3 class="font-semibold" { (translation.language) }
                        p class="whitespace-pre-wrap" { (translation.content) }
                    }
                }
            }
        }
    };

    base(email.name_eng.as_ref(), &content)
}
