use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;
use serde_json::json;

use crate::pipeline::load_weekly;
use crate::types::{ParsePolicy, PipelineConfig};

// ──────────────────────────────────────────────────────────────────────────────
// HJELPERE
// ──────────────────────────────────────────────────────────────────────────────

fn config_for(path: &str, skip_bad_rows: bool) -> PipelineConfig {
    PipelineConfig {
        input_path: path.to_string(),
        parse_policy: if skip_bad_rows {
            ParsePolicy::SkipAndReport
        } else {
            ParsePolicy::FailFast
        },
        ..PipelineConfig::default()
    }
}

fn weekly_json(path: &str, skip_bad_rows: bool) -> Result<String, String> {
    let out = load_weekly(&config_for(path, skip_bad_rows)).map_err(|e| e.to_string())?;
    serde_json::to_string(&out.weeks).map_err(|e| e.to_string())
}

fn normalized_json(path: &str, skip_bad_rows: bool) -> Result<String, String> {
    let out = load_weekly(&config_for(path, skip_bad_rows)).map_err(|e| e.to_string())?;
    let v = json!({
        "columns": crate::NormalizedRun::COLUMNS,
        "runs": out.normalized.runs,
        "report": out.normalized.report,
        "source": "rust_binding",
    });
    Ok(v.to_string())
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

/// Ukestabell som JSON-streng: [{week, distance_km, time_hours}, ...]
#[pyfunction]
#[pyo3(signature = (path, skip_bad_rows = false))]
fn weekly_load_json(path: &str, skip_bad_rows: bool) -> PyResult<String> {
    weekly_json(path, skip_bad_rows).map_err(PyValueError::new_err)
}

/// Normaliserte løp + rapport som JSON-streng.
#[pyfunction]
#[pyo3(signature = (path, skip_bad_rows = false))]
fn normalize_activities_json(path: &str, skip_bad_rows: bool) -> PyResult<String> {
    normalized_json(path, skip_bad_rows).map_err(PyValueError::new_err)
}

/// Ukestabell som liste av dicts (via Python sin json.loads), klar for plotting.
#[pyfunction]
#[pyo3(signature = (path, skip_bad_rows = false))]
fn weekly_load(py: Python<'_>, path: &str, skip_bad_rows: bool) -> PyResult<PyObject> {
    let out = weekly_json(path, skip_bad_rows).map_err(PyValueError::new_err)?;

    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    let obj = json_mod
        .call_method1("loads", (out.as_str(),))
        .map_err(|e| PyValueError::new_err(format!("internal JSON parse error via json.loads: {e}")))?;
    Ok(obj.into_py(py))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn runload_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(weekly_load, m)?)?;
    m.add_function(wrap_pyfunction!(weekly_load_json, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_activities_json, m)?)?;
    Ok(())
}

