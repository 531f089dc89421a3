//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/email/{email_id}', use [format_endpoint].

/// The summary page with the number of emails and translations.
pub const ROOT: &str = "/";
/// The page for listing all emails.
pub const EMAILS_VIEW: &str = "/all/";
/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/allcategories/";
/// The page for creating a new email and its translations.
pub const NEW_EMAIL_VIEW: &str = "/email/create/";
/// The page for editing an existing email and its translations.
pub const EDIT_EMAIL_VIEW: &str = "/email/update/{email_id}";
/// The page for viewing a single email.
pub const EMAIL_VIEW: &str = "/email/{email_id}";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/category/create/";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/category/update/{category_id}";
/// The page for viewing a single category and its emails.
pub const CATEGORY_VIEW: &str = "/category/{category_id}";
/// The route for getting the log in page and submitting the log in form.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/log_out";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/email/{email_id}', '{email_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::EMAILS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_EMAIL_VIEW);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::EDIT_EMAIL_VIEW, 1));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::EMAIL_VIEW, 1));
        assert_endpoint_is_valid_uri(endpoints::NEW_CATEGORY_VIEW);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::EDIT_CATEGORY_VIEW, 1));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::CATEGORY_VIEW, 1));
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::EMAIL_VIEW, 1);

        assert_eq!(formatted_path, "/email/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        let formatted_path = format_endpoint(endpoints::EDIT_CATEGORY_VIEW, 42);

        assert_eq!(formatted_path, "/category/update/42");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::NEW_EMAIL_VIEW, 1);

        assert_eq!(formatted_path, endpoints::NEW_EMAIL_VIEW);
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
