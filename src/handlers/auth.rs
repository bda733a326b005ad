use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fs;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, Session};

use super::html_escape;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{LoginForm, SignupForm};
use crate::services::SharedStorage;

pub async fn serve_home_page() -> AppResult<Response> {
    let home_html = fs::read_to_string("templates/home.html")?;
    Ok(Html(home_html).into_response())
}

pub async fn serve_login_page() -> AppResult<Response> {
    render_login_page("")
}

#[axum::debug_handler]
pub async fn handle_login(
    State((storage, config)): State<(SharedStorage, Config)>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let users = storage.read_users()?;
    if users.get(&login_form.username) != Some(&login_form.password) {
        tracing::info!("Invalid credentials for user: {}", login_form.username);
        return render_login_page("Invalid username or password.");
    }

    session
        .insert("user_session", login_form.username.clone())
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?;

    // Absolute expiry from the moment of login; activity does not slide it.
    let lifetime = Duration::minutes(config.session.lifetime_minutes);
    session.set_expiry(Some(Expiry::AtDateTime(OffsetDateTime::now_utc() + lifetime)));

    tracing::info!("Session established for user: {}", login_form.username);
    Ok(Redirect::to("/analyze").into_response())
}

pub async fn serve_signup_page() -> AppResult<Response> {
    render_signup_page("")
}

pub async fn handle_signup(
    State((storage, _)): State<(SharedStorage, Config)>,
    Form(signup_form): Form<SignupForm>,
) -> AppResult<Response> {
    let users = storage.read_users()?;
    if users.contains_key(&signup_form.username) {
        tracing::info!("Signup rejected, username taken: {}", signup_form.username);
        return render_signup_page("User already exists.");
    }

    storage.save_user(&signup_form.username, &signup_form.password)?;
    tracing::info!("Registered new user: {}", signup_form.username);
    Ok(Redirect::to("/login").into_response())
}

#[axum::debug_handler]
pub async fn handle_logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::warn!("Session flush error: {}", e);
    }
    Redirect::to("/").into_response()
}

fn render_login_page(error: &str) -> AppResult<Response> {
    let login_html = fs::read_to_string("templates/login.html")?;
    Ok(Html(login_html.replace("{{error}}", &html_escape(error))).into_response())
}

fn render_signup_page(error: &str) -> AppResult<Response> {
    let signup_html = fs::read_to_string("templates/signup.html")?;
    Ok(Html(signup_html.replace("{{error}}", &html_escape(error))).into_response())
}
