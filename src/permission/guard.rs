//! Middleware that rejects requests from users without a required permission.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, UserID,
    permission::{Permission, PermissionAuthority},
};

/// The state needed for the permission guard.
#[derive(Debug, Clone)]
pub struct PermissionGuardState {
    /// Decides whether the user holds `required`.
    pub permission_authority: Arc<dyn PermissionAuthority>,
    /// The permission every request through the guard must hold.
    pub required: Permission,
}

/// Middleware function that checks the logged in user holds the required permission.
///
/// Requests are executed normally if the permission is held, otherwise a 403
/// Forbidden response is returned.
///
/// **Note**: This guard must run after the auth guard, which places the [UserID]
/// into the request extensions.
pub async fn permission_guard(
    State(state): State<PermissionGuardState>,
    request: Request,
    next: Next,
) -> Response {
    let user_id = match request.extensions().get::<UserID>() {
        Some(user_id) => *user_id,
        None => {
            tracing::error!(
                "No user ID in request extensions for {}, is the auth guard missing?",
                request.uri()
            );
            return Error::Forbidden.into_response();
        }
    };

    match state
        .permission_authority
        .has_permission(user_id, state.required)
    {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            tracing::info!(
                "User {user_id} denied access to {}: missing permission {}",
                request.uri(),
                state.required
            );
            Error::Forbidden.into_response()
        }
        Err(error) => {
            tracing::error!("Could not check permission {} for user {user_id}: {error}", state.required);
            error.into_response()
        }
    }
}

/// Wrap every route in `router` with a [permission_guard] requiring `permission`.
pub fn require_permission(
    router: Router<AppState>,
    state: &AppState,
    permission: Permission,
) -> Router<AppState> {
    let guard_state = PermissionGuardState {
        permission_authority: state.permission_authority.clone(),
        required: permission,
    };

    router.route_layer(middleware::from_fn_with_state(guard_state, permission_guard))
}
