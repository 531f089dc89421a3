//! Helpers for the `next` URL carried through the log in flow.

use axum::{extract::Request, http::Uri};
use tracing::{error, warn};

use crate::endpoints;

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::LOG_IN_VIEW
}

/// Reduce `raw_url` to a path and query on this site, or `None` if it points
/// elsewhere or back at the log in page.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

fn normalize_hx_current_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// Whether the request was sent by HTMX.
pub fn is_hx_request(request: &Request) -> bool {
    request
        .headers()
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .map(|header| header.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Build the log in URL that sends the user back to the page they asked for.
///
/// HTMX requests are sent back to the page that made the request (the
/// `HX-Current-URL` header) rather than the endpoint HTMX called.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let redirect_target = if is_hx_request(request) {
        redirect_target_from_hx_request(request)?
    } else {
        redirect_target_from_request_uri(request)?
    };

    build_log_in_redirect_url_from_target(&redirect_target)
}

/// Build the log in URL with `redirect_target` as the `next` query parameter.
pub fn build_log_in_redirect_url_from_target(redirect_target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("next", redirect_target)]) {
        Ok(param) => Some(format!("{}?{}", endpoints::LOG_IN_VIEW, param)),
        Err(error) => {
            error!("Could not encode redirect URL {redirect_target}: {error}");
            None
        }
    }
}

fn redirect_target_from_request_uri(request: &Request) -> Option<String> {
    let path_and_query = request.uri().path_and_query()?.as_str();
    normalize_redirect_url(path_and_query)
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let current_url = match request
        .headers()
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    {
        Some(value) => value,
        None => {
            warn!("Missing HX-Current-URL header for HTMX request.");
            return None;
        }
    };

    let redirect_url = normalize_hx_current_url(current_url);
    if redirect_url.is_none() {
        warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}

#[cfg(test)]
mod redirect_tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn accepts_local_path_with_query() {
        assert_eq!(
            normalize_redirect_url("/email/1?tab=translations"),
            Some("/email/1?tab=translations".to_owned())
        );
    }

    #[test]
    fn rejects_other_sites() {
        assert_eq!(normalize_redirect_url("https://example.com/email/1"), None);
        assert_eq!(normalize_redirect_url("//example.com/email/1"), None);
    }

    #[test]
    fn rejects_log_in_page() {
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN_VIEW), None);
    }

    #[test]
    fn uses_request_path_as_next() {
        let request = Request::builder()
            .uri(endpoints::ROOT)
            .body(Body::empty())
            .unwrap();

        let url = build_log_in_redirect_url(&request);

        assert_eq!(url, Some(format!("{}?next=%2F", endpoints::LOG_IN_VIEW)));
    }

    #[test]
    fn uses_current_url_for_htmx_requests() {
        let request = Request::builder()
            .uri(endpoints::NEW_CATEGORY_VIEW)
            .header("HX-Request", "true")
            .header("HX-Current-URL", "http://localhost:3000/all/")
            .body(Body::empty())
            .unwrap();

        let url = build_log_in_redirect_url(&request);

        assert_eq!(url, Some(format!("{}?next=%2Fall%2F", endpoints::LOG_IN_VIEW)));
    }
}
