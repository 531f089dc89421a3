//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level authentication and cookie auth logic.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{
        DEFAULT_COOKIE_DURATION, UserID, get_user_by_username, invalidate_auth_cookie,
        redirect::normalize_redirect_url, set_auth_cookie,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, field_error,
        log_in_card,
    },
};

/// How long the auth cookie should last if the user selects "remember me" at log-in.
pub const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// Shown for an unknown username or a wrong password.
pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Please enter a correct username and password.";

const INTERNAL_ERROR_MSG: &str = "An internal error occurred. Please try again later.";

fn log_in_form(username: &str, error_message: Option<&str>, next: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::LOG_IN_VIEW)
            class="space-y-4 md:space-y-6"
        {
            @if let Some(next) = next {
                input type="hidden" name="next" value=(next);
            }

            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    id="username"
                    type="text"
                    name="username"
                    value=(username)
                    autofocus
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="password" class=(FORM_LABEL_STYLE) { "Password" }

                input
                    id="password"
                    type="password"
                    name="password"
                    placeholder="••••••••"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(error_message.unwrap_or_default()))
            }

            div class="flex items-center gap-x-3"
            {
                input
                    type="checkbox"
                    name="remember_me"
                    id="remember_me"
                    class="rounded-xs";

                label
                    for="remember_me"
                    class="block text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Keep me logged in for one week"
                }
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                "Log in"
            }
        }
    }
}

fn log_in_page(username: &str, error_message: Option<&str>, next: Option<&str>) -> Markup {
    let form = log_in_form(username, error_message, next);
    let content = log_in_card("Log in to your account", &form);
    base("Log In", &content)
}

fn parse_next_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(next) => Some(next),
        None => {
            if let Some(raw_url) = raw_url.filter(|url| !url.is_empty()) {
                tracing::warn!("Invalid redirect URL from {source}: {raw_url}");
            }
            None
        }
    }
}

/// The query string accepted by the log-in page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    /// Where to send the user after they log in.
    pub next: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<NextQuery>) -> Response {
    let next = parse_next_url(query.next.as_deref(), "log-in query");

    log_in_page("", None, next.as_deref()).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The connection used to look up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl LoginState {
    /// Create the state with the default cookie duration.
    pub fn new(cookie_key: Key, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key,
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection,
        }
    }
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the password hash in the database.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LogInData {
    /// Username entered during log-in.
    #[serde(default)]
    pub username: String,

    /// Password entered during log-in.
    #[serde(default)]
    pub password: String,

    /// Whether to extend the initial auth cookie duration.
    ///
    /// This value comes from a checkbox, so it either has a string value or is not set
    /// (see the [MDN docs](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/input/checkbox#value_2)).
    /// The `Some` variant should be interpreted as `true` irregardless of the
    /// string value, and the `None` variant should be interpreted as `false`.
    pub remember_me: Option<String>,

    /// Where to send the user after they log in.
    pub next: Option<String>,
}

fn check_credentials(state: &LoginState, user_data: &LogInData) -> Result<UserID, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        match get_user_by_username(user_data.username.trim(), &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        }
    };

    match user.password_hash.verify(&user_data.password) {
        Ok(true) => Ok(user.id),
        Ok(false) => Err(Error::InvalidCredentials),
        Err(error) => Err(Error::HashingError(error.to_string())),
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the auth cookie is set and the client is
/// redirected to `next`, or the summary page if `next` is missing or unsafe.
/// Otherwise, the log-in page is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let next = parse_next_url(user_data.next.as_deref(), "log-in form");
    let next = next.as_deref();

    let user_id = match check_credentials(&state, &user_data) {
        Ok(user_id) => user_id,
        Err(Error::InvalidCredentials) => {
            tracing::info!("Failed log in attempt for {:?}", user_data.username);
            return log_in_page(
                &user_data.username,
                Some(INVALID_CREDENTIALS_ERROR_MSG),
                next,
            )
            .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return log_in_page(&user_data.username, Some(INTERNAL_ERROR_MSG), next)
                .into_response();
        }
    };

    let cookie_duration = if user_data.remember_me.is_some() {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    let next = next.unwrap_or(endpoints::ROOT);

    match set_auth_cookie(jar.clone(), user_id, cookie_duration) {
        Ok(updated_jar) => (updated_jar, Redirect::to(next)).into_response(),
        Err(error) => {
            tracing::error!("Error setting auth cookie: {error}");
            (
                invalidate_auth_cookie(jar),
                Redirect::to(endpoints::INTERNAL_ERROR_VIEW),
            )
                .into_response()
        }
    }
}
