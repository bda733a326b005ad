use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::fs;
use tower_sessions::Session;

use super::html_escape;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::SharedStorage;

pub async fn show_history(
    State((storage, _)): State<(SharedStorage, Config)>,
    session: Session,
) -> AppResult<Response> {
    let username = session
        .get::<String>("user_session")
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))?;

    // Raw tail of the log; a freshly created log with few rows still has
    // its header inside the tail and it is rendered like any other row.
    let records = storage.read_history(&username)?;
    tracing::debug!("Rendering {} history rows for user {}", records.len(), username);

    let rows_html = records
        .iter()
        .map(|row| {
            let cells = row
                .iter()
                .map(|cell| format!("<td>{}</td>", html_escape(cell)))
                .collect::<Vec<_>>()
                .join("");
            format!("<tr>{}</tr>", cells)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let history_html = fs::read_to_string("templates/history.html")?
        .replace("{{username}}", &html_escape(&username))
        .replace("{{rows}}", &rows_html);

    Ok(Html(history_html).into_response())
}
