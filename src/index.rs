//! The summary page shown after logging in.

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
    auth::get_user_by_id,
    category::count_categories,
    email::count_emails,
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    translation::count_email_translations,
};

/// The state needed for the summary page.
#[derive(Debug, Clone)]
pub struct IndexState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IndexState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The numbers shown on the summary page.
#[derive(Debug, PartialEq)]
struct Summary {
    username: String,
    email_count: usize,
    translation_count: usize,
    category_count: usize,
}

/// Display a greeting and how many emails, translations and categories exist.
pub async fn get_index_page(
    State(state): State<IndexState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let summary = Summary {
        username: get_user_by_id(user_id, &connection)?.username,
        email_count: count_emails(&connection)?,
        translation_count: count_email_translations(&connection)?,
        category_count: count_categories(&connection)?,
    };

    Ok(index_view(&summary).into_response())
}

fn stat_card(id: &str, label: &str, count: usize, link_text: &str, url: &str) -> Markup {
    html! {
        div class="p-6 rounded-lg border border-gray-200 bg-white shadow-sm
            dark:bg-gray-800 dark:border-gray-700"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p id=(id) class="text-3xl font-bold" { (count) }
            a href=(url) class=(LINK_STYLE) { (link_text) }
        }
    }
}

fn index_view(summary: &Summary) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-screen-lg space-y-6"
            {
                h1 class="text-2xl font-bold" { "Hello, " (summary.username) "!" }

                div class="grid gap-4 md:grid-cols-3"
                {
                    (stat_card(
                        "email-count",
                        "Emails",
                        summary.email_count,
                        "View all",
                        endpoints::EMAILS_VIEW,
                    ))
                    (stat_card(
                        "translation-count",
                        "Translations",
                        summary.translation_count,
                        "View emails",
                        endpoints::EMAILS_VIEW,
                    ))
                    (stat_card(
                        "category-count",
                        "Categories",
                        summary.category_count,
                        "View all",
                        endpoints::CATEGORIES_VIEW,
                    ))
                }
            }
        }
    };

    base("Home", &content)
}
