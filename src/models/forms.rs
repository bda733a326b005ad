use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

// ph and tds are typed as f64 so non-numeric input fails form extraction
// before the handler runs.
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub ph: f64,
    pub tds: f64,
    pub region: String,
}
