//! Users, passwords and cookie sessions.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod token;
mod user;

pub use cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{
    INVALID_CREDENTIALS_ERROR_MSG, LogInData, LoginState, NextQuery, REMEMBER_ME_COOKIE_DURATION,
    get_log_in_page, post_log_in,
};
pub use log_out::get_log_out;
pub use middleware::{AuthState, auth_guard};
pub use password::{PasswordHash, ValidatedPassword};
pub use user::{
    User, UserID, create_user, create_user_table, get_all_users, get_user_by_id,
    get_user_by_username,
};
