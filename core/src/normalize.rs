use log::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::models::RawTable;
use crate::parse::{clock_minutes, parse_date, parse_elapsed, parse_number, parse_pace};
use crate::types::{NormalizeReport, Normalized, NormalizedRun, ParsePolicy, SkippedRow};

const ACTIVITY_TYPE: &str = "activity_type";
const RUN_MARKER: &str = "run";

// Indekser inn i NormalizedRun::COLUMNS
const DATE: usize = 0;
const DISTANCE: usize = 1;
const CALORIES: usize = 2;
const AVG_HR: usize = 3;
const AVG_CAD: usize = 4;
const AVG_PACE: usize = 5;
const BEST_PACE: usize = 6;
const STRIDE_LEN: usize = 7;
const ELAPSED_TIME: usize = 8;
const TSS: usize = 9;

/// Én rad etter filter og projeksjon. `row` er radnummeret i eksporten (1-basert).
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    pub row: usize,
    pub cells: [Option<String>; 10],
}

/// Tabell med nøyaktig kolonnene i `NormalizedRun::COLUMNS`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedTable {
    pub rows: Vec<ProjectedRow>,
}

impl ProjectedTable {
    pub fn columns(&self) -> &'static [&'static str] {
        &NormalizedRun::COLUMNS
    }
}

/// Løp = aktivitetstype som inneholder "run" (uavhengig av store/små bokstaver).
/// Tom type teller som ikke-løp.
pub fn is_running(activity_type: Option<&str>) -> bool {
    activity_type
        .map(|t| t.to_lowercase().contains(RUN_MARKER))
        .unwrap_or(false)
}

/// Indekser (0-basert) for radene som er løp. Tabellen må ha kanoniske navn.
pub fn filter_running(table: &RawTable) -> Result<Vec<usize>> {
    let col = table
        .column_index(ACTIVITY_TYPE)
        .ok_or_else(|| PipelineError::MissingColumn(ACTIVITY_TYPE.to_string()))?;

    Ok((0..table.rows.len())
        .filter(|&row| is_running(table.cell(row, col)))
        .collect())
}

/// Plukker ut de 10 kolonnene vi bruker videre; alt annet forkastes.
pub fn project(table: &RawTable, rows: &[usize]) -> Result<ProjectedTable> {
    let mut idx = [0usize; 10];
    for (slot, name) in idx.iter_mut().zip(NormalizedRun::COLUMNS) {
        *slot = table
            .column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
    }

    let rows = rows
        .iter()
        .map(|&row| ProjectedRow {
            row: row + 1,
            cells: idx.map(|col| table.cell(row, col).map(str::to_string)),
        })
        .collect();

    Ok(ProjectedTable { rows })
}

fn required<'a>(r: &'a ProjectedRow, col: usize) -> &'a str {
    r.cells[col].as_deref().unwrap_or("")
}

fn date_field(r: &ProjectedRow, col: usize) -> Result<chrono::NaiveDateTime> {
    let raw = required(r, col);
    parse_date(raw).ok_or_else(|| PipelineError::InvalidDate {
        row: r.row,
        column: NormalizedRun::COLUMNS[col].to_string(),
        value: raw.to_string(),
    })
}

fn duration_field(
    r: &ProjectedRow,
    col: usize,
    parser: fn(&str) -> Option<chrono::NaiveTime>,
) -> Result<f64> {
    let raw = required(r, col);
    parser(raw)
        .map(clock_minutes)
        .ok_or_else(|| PipelineError::InvalidDuration {
            row: r.row,
            column: NormalizedRun::COLUMNS[col].to_string(),
            value: raw.to_string(),
        })
}

fn number_field(r: &ProjectedRow, col: usize) -> Result<Option<f64>> {
    match r.cells[col].as_deref() {
        None => Ok(None),
        Some(raw) => parse_number(raw)
            .map(Some)
            .ok_or_else(|| PipelineError::InvalidNumber {
                row: r.row,
                column: NormalizedRun::COLUMNS[col].to_string(),
                value: raw.to_string(),
            }),
    }
}

/// Konverterer én projisert rad til typede verdier.
pub fn convert_row(r: &ProjectedRow) -> Result<NormalizedRun> {
    let distance = number_field(r, DISTANCE)?.ok_or_else(|| PipelineError::InvalidNumber {
        row: r.row,
        column: NormalizedRun::COLUMNS[DISTANCE].to_string(),
        value: String::new(),
    })?;

    Ok(NormalizedRun {
        date: date_field(r, DATE)?,
        distance,
        calories: number_field(r, CALORIES)?,
        avg_hr: number_field(r, AVG_HR)?,
        avg_cad: number_field(r, AVG_CAD)?,
        avg_pace: duration_field(r, AVG_PACE, parse_pace)?,
        best_pace: duration_field(r, BEST_PACE, parse_pace)?,
        stride_len: number_field(r, STRIDE_LEN)?,
        elapsed_time: duration_field(r, ELAPSED_TIME, parse_elapsed)?,
        tss: number_field(r, TSS)?,
    })
}

/// Konverterer alle rader. Ved `FailFast` avbrytes det på første feil;
/// ved `SkipAndReport` hoppes raden over og returneres i listen.
pub fn convert(
    table: &ProjectedTable,
    policy: ParsePolicy,
) -> Result<(Vec<NormalizedRun>, Vec<SkippedRow>)> {
    let mut runs = Vec::with_capacity(table.rows.len());
    let mut skipped = Vec::new();

    for r in &table.rows {
        match convert_row(r) {
            Ok(run) => {
                debug!("rad {}: {} km, {:.2} min", r.row, run.distance, run.elapsed_time);
                runs.push(run);
            }
            Err(e) if policy == ParsePolicy::SkipAndReport => {
                warn!("hopper over rad {}: {}", r.row, e);
                skipped.push(SkippedRow {
                    row: r.row,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok((runs, skipped))
}

/// Hele normaliseringen: navn → filter → projeksjon → typekonvertering.
pub fn normalize(raw: RawTable, policy: ParsePolicy) -> Result<Normalized> {
    let table = raw.renamed();
    let rows_read = table.rows.len();

    let matching = filter_running(&table)?;
    let projected = project(&table, &matching)?;
    let (runs, skipped) = convert(&projected, policy)?;

    let report = NormalizeReport {
        rows_read,
        rows_matched: matching.len(),
        rows_normalized: runs.len(),
        skipped,
    };
    info!(
        "normalisert {} av {} rader ({} løp, {} hoppet over)",
        report.rows_normalized,
        report.rows_read,
        report.rows_matched,
        report.skipped.len()
    );

    Ok(Normalized { runs, report })
}
