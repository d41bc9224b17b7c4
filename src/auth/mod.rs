//! Cookie based authentication: logging in and out, the auth token, and the
//! middleware that guards routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod token;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{LoginState, get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub(crate) use redirect::build_log_in_redirect_url;
pub(crate) use token::Token;

#[cfg(test)]
pub use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;
