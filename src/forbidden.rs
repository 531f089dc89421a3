//! The page shown when a logged in user lacks the permission for a page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The 403 page as a response.
pub fn get_403_forbidden_response() -> Response {
    let page = error_view(
        "Forbidden",
        "403",
        "You don't have permission to do that.",
        "Ask an administrator to grant you access.",
    );

    (StatusCode::FORBIDDEN, Html(page.into_string())).into_response()
}
