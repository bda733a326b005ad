use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Response},
};
use std::fs;
use tower_sessions::Session;

use super::html_escape;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{AnalysisRecord, AnalyzeForm};
use crate::services::SharedStorage;
use crate::water_quality::{analyze_water, estimate_minerals};

pub async fn serve_analyze_page() -> AppResult<Response> {
    let analyze_html = fs::read_to_string("templates/analyze.html")?;
    Ok(Html(analyze_html).into_response())
}

#[axum::debug_handler]
pub async fn handle_analyze(
    State((storage, _)): State<(SharedStorage, Config)>,
    session: Session,
    Form(form): Form<AnalyzeForm>,
) -> AppResult<Response> {
    let username = session
        .get::<String>("user_session")
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))?;

    tracing::info!(
        "Analysis for user {}: ph={} tds={} region={}",
        username,
        form.ph,
        form.tds,
        form.region
    );

    let minerals = estimate_minerals(form.tds, &form.region);
    let (result, message) = analyze_water(form.ph, form.tds);

    let record = AnalysisRecord::new(form.ph, form.tds, minerals, result);
    storage.append_record(&username, &record)?;

    let result_html = fs::read_to_string("templates/result.html")?
        .replace("{{ph}}", &form.ph.to_string())
        .replace("{{tds}}", &form.tds.to_string())
        .replace("{{region}}", &html_escape(&form.region))
        .replace("{{ca}}", &minerals.calcium.to_string())
        .replace("{{mg}}", &minerals.magnesium.to_string())
        .replace("{{na}}", &minerals.sodium.to_string())
        .replace("{{k}}", &minerals.potassium.to_string())
        .replace("{{so4}}", &minerals.sulphate.to_string())
        .replace("{{cl}}", &minerals.chloride.to_string())
        .replace("{{result}}", result)
        .replace("{{message}}", message);

    Ok(Html(result_html).into_response())
}
