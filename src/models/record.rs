use crate::water_quality::MineralEstimate;
use chrono::Local;

/// Column order of every per-user record file. Potassium comes before
/// sodium here, matching the order the values are written in.
pub const RECORD_HEADER: [&str; 10] = [
    "DateTime",
    "pH",
    "TDS",
    "Calcium",
    "Magnesium",
    "Potassium",
    "Sodium",
    "Sulphate",
    "Chloride",
    "Result",
];

/// One immutable analysis result, appended to the owning user's log file.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub timestamp: String,
    pub ph: f64,
    pub tds: f64,
    pub minerals: MineralEstimate,
    pub result: String,
}

impl AnalysisRecord {
    pub fn new(ph: f64, tds: f64, minerals: MineralEstimate, result: &str) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ph,
            tds,
            minerals,
            result: result.to_string(),
        }
    }

    /// Serializes the record in the persisted column order declared by
    /// [`RECORD_HEADER`].
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.ph.to_string(),
            self.tds.to_string(),
            self.minerals.calcium.to_string(),
            self.minerals.magnesium.to_string(),
            self.minerals.potassium.to_string(),
            self.minerals.sodium.to_string(),
            self.minerals.sulphate.to_string(),
            self.minerals.chloride.to_string(),
            self.result.clone(),
        ]
    }
}
