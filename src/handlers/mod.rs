mod analyze;
mod auth;
mod history;

pub use analyze::{handle_analyze, serve_analyze_page};
pub use auth::{
    handle_login, handle_logout, handle_signup, serve_home_page, serve_login_page,
    serve_signup_page,
};
pub use history::show_history;

/// Escapes user-supplied values before template insertion.
pub(crate) fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
