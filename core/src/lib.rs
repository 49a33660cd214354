//! runload_core: løpeeksport → normaliserte løp → ukentlig treningsbelastning.
//!
//! Flyten er rå tabell → [`normalize()`] → [`aggregate_weekly`] → [`ChartRenderer`].
//! Hvert steg tar forrige stegs resultat og returnerer en ny verdi.

pub mod chart;
pub mod cli;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod storage;
pub mod types;
pub mod weekly;

#[cfg(feature = "python")]
mod py;

pub use chart::{ChartRenderer, SvgChartRenderer};
pub use error::{PipelineError, Result};
pub use metrics::Metrics;
pub use models::{canonical_name, RawTable, SchemaReport};
pub use normalize::normalize;
pub use pipeline::{load_weekly, run_pipeline, weekly_load, PipelineOutput};
pub use storage::{load_config, read_activities, save_config};
pub use types::{
    NormalizeReport, Normalized, NormalizedRun, ParsePolicy, PipelineConfig, SkippedRow,
    WeeklyBucket,
};
pub use weekly::{aggregate_weekly, week_start};
