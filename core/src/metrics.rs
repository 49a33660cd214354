use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::error::Result;
use crate::types::NormalizeReport;

/// Tellere for én kjøring, registrert i et eget register.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub rows_read: IntCounter,
    pub rows_kept: IntCounter,
    pub rows_skipped: IntCounter,
    pub weeks: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter> {
    let c = IntCounter::new(name, help)?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        Ok(Self {
            rows_read: counter(&registry, "runload_rows_read_total", "Rader lest fra eksporten")?,
            rows_kept: counter(&registry, "runload_rows_kept_total", "Løp etter normalisering")?,
            rows_skipped: counter(&registry, "runload_rows_skipped_total", "Rader hoppet over")?,
            weeks: counter(&registry, "runload_weeks_total", "Uker med minst ett løp")?,
            registry,
        })
    }

    pub fn record_normalize(&self, report: &NormalizeReport) {
        self.rows_read.inc_by(report.rows_read as u64);
        self.rows_kept.inc_by(report.rows_normalized as u64);
        self.rows_skipped.inc_by(report.skipped.len() as u64);
    }

    pub fn record_weeks(&self, n: usize) {
        self.weeks.inc_by(n as u64);
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()).into())
    }
}
