use anyhow::Context;
use log::debug;

use runload_core::cli::{print_normalize_report, print_schema_report, print_weekly_report};
use runload_core::logging::setup_logging;
use runload_core::{load_config, run_pipeline, Metrics, SvgChartRenderer};

const CONFIG_PATH: &str = "runload.json";

fn run() -> anyhow::Result<()> {
    let cfg = load_config(CONFIG_PATH).context("kunne ikke lese config")?;
    let metrics = Metrics::new().context("kunne ikke registrere metrics")?;
    let renderer = SvgChartRenderer::new(cfg.chart_path.clone(), cfg.chart_width, cfg.chart_height);

    let out = run_pipeline(&cfg, &renderer, &metrics)
        .with_context(|| format!("kjøring feilet for {}", cfg.input_path))?;

    print_schema_report(&out.schema);
    print_normalize_report(&out.normalized.report);
    print_weekly_report(&out.weeks);
    println!("Graf: {}", cfg.chart_path);

    debug!("metrics:\n{}", metrics.render()?);
    Ok(())
}

fn main() {
    if let Err(e) = setup_logging() {
        eprintln!("kunne ikke sette opp logging: {e}");
    }

    if let Err(e) = run() {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}
