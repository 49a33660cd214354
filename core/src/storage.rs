use std::fs::File;
use std::path::Path;

use log::{info, warn};

use crate::error::{PipelineError, Result};
use crate::models::RawTable;
use crate::types::PipelineConfig;

/// Leser inn config fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-config.
pub fn load_config(path: &str) -> Result<PipelineConfig> {
    if !Path::new(path).exists() {
        warn!("⚠️ Fant ikke config på {}, bruker default", path);
        return Ok(PipelineConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    let cfg: PipelineConfig =
        serde_path_to_error::deserialize(&mut de).map_err(|e| PipelineError::Config {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;

    info!("📂 Config lastet fra {} (input={})", path, cfg.input_path);
    Ok(cfg)
}

/// Lagrer config til disk som JSON (pretty-print).
pub fn save_config(cfg: &PipelineConfig, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(cfg).map_err(|e| PipelineError::Config {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|source| PipelineError::Io {
        path: path.to_string(),
        source,
    })?;
    info!("✅ Config lagret til {}", path);
    Ok(())
}

fn delimiter_byte(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(PipelineError::Config {
            path: "delimiter".to_string(),
            message: format!("skilletegn må være ASCII, fikk {c:?}"),
        })
    }
}

/// Leser aktivitetseksporten. Celler trimmes; tomme celler blir `None`.
pub fn read_activities(path: &str, delimiter: char) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_string(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Vec<Option<String>> = record
            .iter()
            .map(|c| {
                let c = c.trim();
                (!c.is_empty()).then(|| c.to_string())
            })
            .collect();
        rows.push(row);
    }

    info!("📂 Leste {} rader og {} kolonner fra {}", rows.len(), headers.len(), path);
    Ok(RawTable::new(headers, rows))
}
