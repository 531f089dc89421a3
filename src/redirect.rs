//! Redirects that work for both plain form posts and HTMX requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

/// Send the client to `url` after a successful form submission.
///
/// Plain form posts get a 303 so the browser follows up with a GET. HTMX
/// ignores 3xx responses, so HTMX requests get an `HX-Redirect` header instead.
pub fn see_other(is_htmx: bool, url: &str) -> Response {
    if is_htmx {
        (HxRedirect(url.to_owned()), StatusCode::SEE_OTHER).into_response()
    } else {
        Redirect::to(url).into_response()
    }
}
