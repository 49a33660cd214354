use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Én løpeøkt etter normalisering. Tempo/tid i minutter, distanse i km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRun {
    pub date: NaiveDateTime,
    pub distance: f64,            // km
    pub calories: Option<f64>,
    pub avg_hr: Option<f64>,      // bpm
    pub avg_cad: Option<f64>,     // spm
    pub avg_pace: f64,            // min/km
    pub best_pace: f64,           // min/km
    pub stride_len: Option<f64>,  // m
    pub elapsed_time: f64,        // min
    pub tss: Option<f64>,
}

impl NormalizedRun {
    /// Kolonnene som beholdes etter projeksjon, i fast rekkefølge.
    pub const COLUMNS: [&'static str; 10] = [
        "date",
        "distance",
        "calories",
        "avg_hr",
        "avg_cad",
        "avg_pace",
        "best_pace",
        "stride_len",
        "elapsed_time",
        "tss",
    ];
}

/// Sum per kalenderuke (mandag 00:00 som ukestart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub week: NaiveDateTime,
    pub distance_km: f64,
    pub time_hours: f64,
}

/// Hva som skjer når en rad ikke lar seg konvertere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Første feil stopper hele kjøringen.
    #[default]
    FailFast,
    /// Raden hoppes over, logges og rapporteres.
    SkipAndReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: String,
    pub chart_path: String,
    pub parse_policy: ParsePolicy,
    pub chart_width: u32,
    pub chart_height: u32,
    pub delimiter: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: "data/Activities.csv".to_string(),
            chart_path: "weekly_distance.svg".to_string(),
            parse_policy: ParsePolicy::FailFast,
            chart_width: 1200,
            chart_height: 700,
            delimiter: ',',
        }
    }
}

/// Rad som ble hoppet over (kun ved `ParsePolicy::SkipAndReport`).
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizeReport {
    pub rows_read: usize,
    pub rows_matched: usize,
    pub rows_normalized: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Normalized {
    pub runs: Vec<NormalizedRun>,
    pub report: NormalizeReport,
}
