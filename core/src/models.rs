use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::parse::{parse_date, parse_elapsed, parse_number};

/// Kildenavn (Garmin-eksport) → kanoniske snake_case-navn.
pub const COLUMN_RENAMES: [(&str, &str); 33] = [
    ("Activity Type", "activity_type"),
    ("Date", "date"),
    ("Title", "title"),
    ("Distance", "distance"),
    ("Time", "time"),
    ("Moving Time", "moving_time"),
    ("Elapsed Time", "elapsed_time"),
    ("Avg Pace", "avg_pace"),
    ("Best Pace", "best_pace"),
    ("Calories", "calories"),
    ("Avg HR", "avg_hr"),
    ("Max HR", "max_hr"),
    ("Avg Run Cadence", "avg_cad"),
    ("Max Run Cadence", "max_cad"),
    ("Aerobic TE", "aerobic_te"),
    ("Total Ascent", "ascent"),
    ("Total Descent", "descent"),
    ("Avg Stride Length", "stride_len"),
    ("Avg Vertical Ratio", "vert_ratio"),
    ("Avg Vertical Oscillation", "vert_osc"),
    ("Avg Ground Contact Time", "gct"),
    ("Avg GAP", "avg_gap_str"),
    ("Normalized Power® (NP®)", "np"),
    ("Training Stress Score®", "tss"),
    ("Avg Power", "avg_power"),
    ("Max Power", "max_power"),
    ("Steps", "steps"),
    ("Body Battery Drain", "bb_drain"),
    ("Decompression", "decompression"),
    ("Best Lap Time", "best_lap_str"),
    ("Number of Laps", "laps"),
    ("Min Elevation", "min_elev"),
    ("Max Elevation", "max_elev"),
];

static RENAME_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COLUMN_RENAMES.iter().copied().collect());

/// Kanonisk navn for en kildekolonne. Ukjente navn beholdes som de er.
pub fn canonical_name(source: &str) -> &str {
    RENAME_MAP.get(source.trim()).copied().unwrap_or(source)
}

/// Rå eksport: header + rader. Tom celle = `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Ny tabell med kanoniske kolonnenavn. Radene flyttes uendret.
    pub fn renamed(self) -> Self {
        let headers = self
            .headers
            .iter()
            .map(|h| canonical_name(h).to_string())
            .collect();
        Self {
            headers,
            rows: self.rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Celle som `&str`; rader kortere enn header gir `None`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// Kolonneoversikt med kanoniske navn. Tabellen selv endres ikke.
    pub fn schema_report(&self) -> SchemaReport {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let values: Vec<&str> = (0..self.rows.len())
                    .filter_map(|row| self.cell(row, col))
                    .collect();
                ColumnSummary {
                    name: canonical_name(name).to_string(),
                    non_null: values.len(),
                    kind: infer_kind(&values),
                }
            })
            .collect();

        SchemaReport {
            rows: self.rows.len(),
            columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Clock,
    Date,
    Text,
    Empty,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Clock => "clock",
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        };
        f.write_str(s)
    }
}

fn infer_kind(values: &[&str]) -> ColumnKind {
    if values.is_empty() {
        ColumnKind::Empty
    } else if values.iter().all(|v| parse_number(v).is_some()) {
        ColumnKind::Numeric
    } else if values.iter().all(|v| parse_elapsed(v).is_some()) {
        ColumnKind::Clock
    } else if values.iter().all(|v| parse_date(v).is_some()) {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// Diagnostisk oversikt over rådata (kolonne, antall ikke-tomme, type).
#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rader, {} kolonner", self.rows, self.columns.len())?;
        writeln!(f, " #  {:<26} {:>9}  kind", "column", "non-null")?;
        for (i, c) in self.columns.iter().enumerate() {
            writeln!(f, "{:>2}  {:<26} {:>9}  {}", i, c.name, c.non_null, c.kind)?;
        }
        Ok(())
    }
}
