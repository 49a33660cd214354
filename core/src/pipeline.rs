use log::{debug, info};

use crate::chart::ChartRenderer;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::{RawTable, SchemaReport};
use crate::normalize::normalize;
use crate::storage::read_activities;
use crate::types::{Normalized, ParsePolicy, PipelineConfig, WeeklyBucket};
use crate::weekly::aggregate_weekly;

/// Resultatet av én kjøring: rapport over rådata, normaliserte løp og ukesummer.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub schema: SchemaReport,
    pub normalized: Normalized,
    pub weeks: Vec<WeeklyBucket>,
}

/// Rå tabell → normaliserte løp → ukesummer. Ingen I/O.
pub fn weekly_load(raw: RawTable, policy: ParsePolicy) -> Result<(Normalized, Vec<WeeklyBucket>)> {
    let normalized = normalize(raw, policy)?;
    let weeks = aggregate_weekly(&normalized.runs);
    Ok((normalized, weeks))
}

/// Les eksporten fra disk og kjør hele pipelinen uten å tegne graf.
pub fn load_weekly(cfg: &PipelineConfig) -> Result<PipelineOutput> {
    let raw = read_activities(&cfg.input_path, cfg.delimiter)?;
    let schema = raw.schema_report();
    debug!("rå eksport:\n{schema}");
    let (normalized, weeks) = weekly_load(raw, cfg.parse_policy)?;
    Ok(PipelineOutput {
        schema,
        normalized,
        weeks,
    })
}

/// Full kjøring: les, normaliser, aggreger og gi ukestabellen til grafen.
pub fn run_pipeline(
    cfg: &PipelineConfig,
    renderer: &dyn ChartRenderer,
    metrics: &Metrics,
) -> Result<PipelineOutput> {
    info!("▶️ Starter med {} (policy={:?})", cfg.input_path, cfg.parse_policy);

    let out = load_weekly(cfg)?;
    metrics.record_normalize(&out.normalized.report);
    metrics.record_weeks(out.weeks.len());

    renderer.render(&out.weeks)?;
    Ok(out)
}
