//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::internal_server_error::InternalServerError;

/// Bodies longer than this many bytes are cut short at `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const REDACTED_FIELDS: [&str; 1] = ["password"];

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Password fields in submitted forms are never logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return InternalServerError::default().into_response();
        }
    };
    let body_text = String::from_utf8_lossy(&body_bytes);

    let is_form_post = parts.method == Method::POST
        && parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

    if is_form_post {
        log_body("Received request", &parts, &redact_form_fields(&body_text));
    } else {
        log_body("Received request", &parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            Bytes::new()
        }
    };
    log_body("Sending response", &parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Replace the values of password fields in a URL encoded form.
fn redact_form_fields(form_text: &str) -> String {
    form_text
        .split('&')
        .map(|pair| {
            let key = pair.split_once('=').map_or(pair, |(key, _)| key);

            if REDACTED_FIELDS.contains(&key) {
                format!("{key}=********")
            } else {
                pair.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// The longest prefix of `text` within [LOG_BODY_LENGTH_LIMIT] bytes that
/// does not split a character.
fn truncate(text: &str) -> &str {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return text;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_body(message: &str, parts: &impl std::fmt::Debug, body: &str) {
    let truncated = truncate(body);

    if truncated.len() < body.len() {
        tracing::info!("{message}: {parts:#?}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{message}: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod logging_tests {
    use axum::{Form, Router, middleware, routing::post};
    use axum_test::TestServer;
    use serde::Deserialize;

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware, redact_form_fields, truncate};

    #[test]
    fn redacts_password_only() {
        let redacted = redact_form_fields("username=alice&password=hunter2&next=%2F");

        assert_eq!(redacted, "username=alice&password=********&next=%2F");
    }

    #[test]
    fn redaction_leaves_similar_names_alone() {
        let redacted = redact_form_fields("password_hint=cat&password=dog");

        assert_eq!(redacted, "password_hint=cat&password=********");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = format!("{}é", "a".repeat(LOG_BODY_LENGTH_LIMIT - 1));

        let truncated = truncate(&text);

        assert_eq!(truncated.len(), LOG_BODY_LENGTH_LIMIT - 1);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short"), "short");
    }

    #[derive(Deserialize)]
    struct EchoForm {
        name: String,
    }

    async fn echo(Form(form): Form<EchoForm>) -> String {
        form.name
    }

    #[tokio::test]
    async fn middleware_passes_body_through() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/echo")
            .form(&[("name", "x".repeat(100)), ("password", "secret".to_owned())])
            .await;

        response.assert_status_ok();
        response.assert_text("x".repeat(100));
    }
}
