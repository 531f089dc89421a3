//! Emails listing page.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryId, CategoryName, get_all_categories},
    email::{Email, get_all_emails},
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the emails listing page.
#[derive(Debug, Clone)]
pub struct EmailsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EmailsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// An email with the name of its category for template rendering.
struct EmailRow {
    email: Email,
    url: String,
    category_name: Option<CategoryName>,
}

/// Render every email with its category.
pub async fn get_emails_page(State(state): State<EmailsPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let emails = get_all_emails(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve emails: {error}"))?;
    let category_names = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect::<HashMap<CategoryId, CategoryName>>();

    let rows = emails
        .into_iter()
        .map(|email| EmailRow {
            url: endpoints::format_endpoint(endpoints::EMAIL_VIEW, email.id),
            category_name: email
                .category_id
                .and_then(|category_id| category_names.get(&category_id).cloned()),
            email,
        })
        .collect::<Vec<_>>();

    Ok(emails_view(&rows).into_response())
}

fn emails_view(rows: &[EmailRow]) -> Markup {
    let nav_bar = NavBar::new(endpoints::EMAILS_VIEW).into_html();

    let table_row = |row: &EmailRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(row.url) class=(LINK_STYLE) { (row.email.name_eng) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    a href=(row.url) class=(LINK_STYLE) { (row.email.name_esp) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    @if let Some(category_name) = &row.category_name {
                        span class=(CATEGORY_BADGE_STYLE) { (category_name) }
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Emails" }

                    a href=(endpoints::NEW_EMAIL_VIEW) class=(LINK_STYLE)
                    {
                        "Create Email"
                    }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "English name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Spanish name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        }
                    }

                    tbody
                    {
                        @for row in rows {
                            (table_row(row))
                        }

                        @if rows.is_empty() {
                            tr
                            {
                                td
                                    colspan="3"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "No emails created yet. "
                                    a href=(endpoints::NEW_EMAIL_VIEW) class=(LINK_STYLE)
                                    {
                                        "Create your first email"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Emails", &content)
}
