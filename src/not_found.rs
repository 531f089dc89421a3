//! The page shown for unknown routes and missing records.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for unmatched routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// The 404 page as a response.
pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Sorry, we can't find that page.",
        "The email or category may not exist. Check the address or go back to the homepage.",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}
