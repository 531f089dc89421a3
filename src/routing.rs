//! Application router configuration with protected and unprotected route definitions.

use std::path::Path;

use axum::{
    Router, middleware,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, get_log_in_page, get_log_out, post_log_in},
    category::{
        create_category_endpoint, get_categories_page, get_category_page, get_edit_category_page,
        get_new_category_page, update_category_endpoint,
    },
    email::{
        create_email_endpoint, get_edit_email_page, get_email_page, get_emails_page,
        get_new_email_page, update_email_endpoint,
    },
    endpoints,
    index::get_index_page,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    permission::{Permission, require_permission},
};

/// Return a router with all the app's routes.
///
/// Static files are served from `static_dir` under [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let unprotected_routes = Router::new()
        .route(
            endpoints::LOG_IN_VIEW,
            get(get_log_in_page).post(post_log_in),
        )
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let logged_in_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EMAILS_VIEW, get(get_emails_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page));

    let permission_routes = [
        (
            Permission::AddEmail,
            Router::new().route(
                endpoints::NEW_EMAIL_VIEW,
                get(get_new_email_page).post(create_email_endpoint),
            ),
        ),
        (
            Permission::ChangeEmail,
            Router::new().route(
                endpoints::EDIT_EMAIL_VIEW,
                get(get_edit_email_page).post(update_email_endpoint),
            ),
        ),
        (
            Permission::ViewEmail,
            Router::new().route(endpoints::EMAIL_VIEW, get(get_email_page)),
        ),
        (
            Permission::AddCategory,
            Router::new().route(
                endpoints::NEW_CATEGORY_VIEW,
                get(get_new_category_page).post(create_category_endpoint),
            ),
        ),
        (
            Permission::ChangeCategory,
            Router::new().route(
                endpoints::EDIT_CATEGORY_VIEW,
                get(get_edit_category_page).post(update_category_endpoint),
            ),
        ),
        (
            Permission::ViewCategory,
            Router::new().route(endpoints::CATEGORY_VIEW, get(get_category_page)),
        ),
    ];

    // The permission guards read the user ID that the auth guard sets, so the
    // auth guard is layered on last to run first.
    let protected_routes = permission_routes
        .into_iter()
        .fold(logged_in_routes, |routes, (permission, router)| {
            routes.merge(require_permission(router, &state, permission))
        })
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::{TestResponse, TestServer};
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        AppState, Error, PasswordHash, UserID, ValidatedPassword,
        auth::{COOKIE_TOKEN, create_user},
        category::{CategoryName, create_category},
        email::{EmailFormData, EmailName, NewEmail, create_email, get_email},
        endpoints,
        permission::{Permission, PermissionAuthority, grant_permission},
        translation::{
            EXTRA_SLOTS, Language, ValidTranslation, count_email_translations,
            get_translations_for_email,
        },
    };

    use super::build_router;

    const PASSWORD: &str = "test";

    struct TestApp {
        server: TestServer,
        state: AppState,
    }

    impl TestApp {
        fn new() -> Self {
            Self::with_state(AppState::new(Connection::open_in_memory().unwrap(), "foobar").unwrap())
        }

        fn with_state(state: AppState) -> Self {
            let server = TestServer::try_new(build_router(state.clone(), "static/"))
                .expect("Could not create test server.");

            Self { server, state }
        }

        /// Create a user holding `permissions` and log them in.
        async fn log_in_as(&self, username: &str, permissions: &[Permission]) -> Cookie<'static> {
            {
                let connection = self.state.db_connection.lock().unwrap();
                let user = create_user(
                    username,
                    PasswordHash::new(ValidatedPassword::new_unchecked(PASSWORD), 4).unwrap(),
                    &connection,
                )
                .unwrap();

                for permission in permissions {
                    grant_permission(user.id, *permission, &connection).unwrap();
                }
            }

            let response = self
                .server
                .post(endpoints::LOG_IN_VIEW)
                .form(&[("username", username), ("password", PASSWORD)])
                .await;
            response.assert_status(StatusCode::SEE_OTHER);

            response.cookie(COOKIE_TOKEN)
        }

        fn with_welcome_email(&self, translations: &[(Language, &str)]) {
            let connection = self.state.db_connection.lock().unwrap();
            let category = create_category(
                CategoryName::new_unchecked("Company Introductions"),
                &connection,
            )
            .unwrap();
            let translations = translations
                .iter()
                .map(|(language, content)| ValidTranslation {
                    id: None,
                    language: *language,
                    content: (*content).to_owned(),
                })
                .collect::<Vec<_>>();

            create_email(
                &NewEmail {
                    name_eng: EmailName::new_unchecked("Welcome"),
                    name_esp: EmailName::new_unchecked("Bienvenido"),
                    category_id: Some(category.id),
                },
                &translations,
                &connection,
            )
            .unwrap();
        }
    }

    fn html_of(response: &TestResponse) -> Html {
        Html::parse_document(&response.text())
    }

    fn count(html: &Html, selector: &str) -> usize {
        html.select(&Selector::parse(selector).unwrap()).count()
    }

    #[tokio::test]
    async fn unauthenticated_request_redirects_to_log_in_with_next() {
        let app = TestApp::new();

        let response = app.server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/log_in?next=%2F");
    }

    #[tokio::test]
    async fn unauthenticated_htmx_request_gets_hx_redirect() {
        let app = TestApp::new();

        let response = app
            .server
            .post(endpoints::NEW_CATEGORY_VIEW)
            .add_header("hx-request", "true")
            .add_header("hx-current-url", "http://localhost/category/create/")
            .form(&[("name", "Sales")])
            .await;

        assert_eq!(
            response.header("hx-redirect"),
            "/log_in?next=%2Fcategory%2Fcreate%2F"
        );
    }

    #[tokio::test]
    async fn log_in_follows_next() {
        let app = TestApp::new();
        {
            let connection = app.state.db_connection.lock().unwrap();
            create_user(
                "alice",
                PasswordHash::new(ValidatedPassword::new_unchecked(PASSWORD), 4).unwrap(),
                &connection,
            )
            .unwrap();
        }

        let response = app
            .server
            .post(endpoints::LOG_IN_VIEW)
            .form(&[
                ("username", "alice"),
                ("password", PASSWORD),
                ("next", "/allcategories/"),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::CATEGORIES_VIEW);
    }

    #[tokio::test]
    async fn logged_in_user_sees_summary_and_lists() {
        let app = TestApp::new();
        let cookie = app.log_in_as("alice", &[]).await;

        for path in [endpoints::ROOT, endpoints::EMAILS_VIEW, endpoints::CATEGORIES_VIEW] {
            app.server
                .get(path)
                .add_cookie(cookie.clone())
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn email_detail_without_view_permission_is_forbidden() {
        let app = TestApp::new();
        app.with_welcome_email(&[]);
        let cookie = app.log_in_as("alice", &[Permission::ChangeEmail]).await;

        let response = app.server.get("/email/1").add_cookie(cookie).await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn edit_link_depends_on_change_permission() {
        let app = TestApp::new();
        app.with_welcome_email(&[(Language::Spanish, "Bienvenido")]);
        let viewer = app.log_in_as("viewer", &[Permission::ViewEmail]).await;
        let editor = app
            .log_in_as("editor", &[Permission::ViewEmail, Permission::ChangeEmail])
            .await;

        let viewer_page = app.server.get("/email/1").add_cookie(viewer).await;
        let editor_page = app.server.get("/email/1").add_cookie(editor).await;

        viewer_page.assert_status_ok();
        assert_eq!(count(&html_of(&viewer_page), "a#edit-email"), 0);
        editor_page.assert_status_ok();
        assert_eq!(count(&html_of(&editor_page), "a#edit-email"), 1);
    }

    #[tokio::test]
    async fn missing_email_is_not_found() {
        let app = TestApp::new();
        let cookie = app.log_in_as("alice", &[Permission::ViewEmail]).await;

        let response = app.server.get("/email/42").add_cookie(cookie).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_ids_are_not_found() {
        let app = TestApp::new();
        app.with_welcome_email(&[]);
        let cookie = app.log_in_as("alice", &Permission::ALL).await;

        for path in [
            "/email/abc",
            "/category/abc",
            "/email/update/abc",
            "/category/update/abc",
            "/email/create",
            "/email/99999999999999999999",
        ] {
            let response = app.server.get(path).add_cookie(cookie.clone()).await;

            assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
            assert!(response.text().contains("Sorry, we can't find that page."), "{path}");
        }
    }

    #[tokio::test]
    async fn update_form_has_existing_plus_blank_slots() {
        let app = TestApp::new();
        app.with_welcome_email(&[(Language::English, "Welcome"), (Language::Spanish, "Bienvenido")]);
        let cookie = app.log_in_as("alice", &[Permission::ChangeEmail]).await;

        let response = app.server.get("/email/update/1").add_cookie(cookie).await;

        response.assert_status_ok();
        assert_eq!(count(&html_of(&response), "textarea[name=content]"), 2 + EXTRA_SLOTS);
    }

    #[tokio::test]
    async fn create_category_then_email() {
        let app = TestApp::new();
        let cookie = app
            .log_in_as("alice", &[Permission::AddCategory, Permission::AddEmail])
            .await;

        let response = app
            .server
            .post(endpoints::NEW_CATEGORY_VIEW)
            .add_cookie(cookie.clone())
            .form(&[("name", "Company Introductions")])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::EMAILS_VIEW);

        let form = EmailFormData {
            name_eng: "Welcome".to_owned(),
            name_esp: "Bienvenido".to_owned(),
            category_id: "1".to_owned(),
            translation_id: vec![String::new(); 3],
            language: vec!["ES".to_owned(), "EN".to_owned(), "EN".to_owned()],
            content: vec!["Bienvenido".to_owned(), String::new(), String::new()],
            delete: Vec::new(),
        };
        let response = app
            .server
            .post(endpoints::NEW_EMAIL_VIEW)
            .add_cookie(cookie)
            .content_type("application/x-www-form-urlencoded")
            .bytes(serde_html_form::to_string(&form).unwrap().into())
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/email/1");

        let connection = app.state.db_connection.lock().unwrap();
        assert_eq!(get_email(1, &connection).unwrap().category_id, Some(1));
        let translations = get_translations_for_email(1, &connection).unwrap();
        assert_eq!(translations.len(), 1);
        assert_eq!(translations[0].email_id, Some(1));
        assert_eq!(count_email_translations(&connection), Ok(1));
    }

    #[tokio::test]
    async fn create_category_without_permission_is_forbidden() {
        let app = TestApp::new();
        let cookie = app.log_in_as("alice", &[Permission::ViewCategory]).await;

        let response = app
            .server
            .post(endpoints::NEW_CATEGORY_VIEW)
            .add_cookie(cookie)
            .form(&[("name", "Sales")])
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[derive(Debug)]
    struct DenyAll;

    impl PermissionAuthority for DenyAll {
        fn has_permission(&self, _: UserID, _: Permission) -> Result<bool, Error> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn injected_authority_decides_access() {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "foobar")
            .unwrap()
            .with_permission_authority(Arc::new(DenyAll));
        let app = TestApp::with_state(state);
        let cookie = app.log_in_as("alice", &Permission::ALL).await;

        let response = app.server.get("/category/1").add_cookie(cookie).await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn log_out_clears_session() {
        let app = TestApp::new();
        let cookie = app.log_in_as("alice", &[]).await;

        let response = app.server.get(endpoints::LOG_OUT).add_cookie(cookie).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
        assert_eq!(
            response.cookie(COOKIE_TOKEN).max_age(),
            Some(time::Duration::ZERO)
        );
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = TestApp::new();
        let cookie = app.log_in_as("alice", &[]).await;

        let response = app.server.get("/no/such/page").add_cookie(cookie).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
