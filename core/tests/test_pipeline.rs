use std::cell::RefCell;
use std::fs;

use chrono::{NaiveDate, NaiveTime};
use runload_core::cli::format_weekly_table;
use runload_core::{
    load_weekly, read_activities, run_pipeline, weekly_load, ChartRenderer, Metrics, ParsePolicy,
    PipelineConfig, PipelineError, SvgChartRenderer, WeeklyBucket,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/Activities.csv");

/// Tar vare på det grafen fikk, i stedet for å tegne.
#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<Vec<WeeklyBucket>>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, weeks: &[WeeklyBucket]) -> runload_core::Result<()> {
        self.calls.borrow_mut().push(weeks.to_vec());
        Ok(())
    }
}

fn fixture_config() -> PipelineConfig {
    PipelineConfig {
        input_path: FIXTURE.to_string(),
        ..PipelineConfig::default()
    }
}

#[test]
fn fixture_weeks_match_hand_computed_sums() {
    let renderer = RecordingRenderer::default();
    let metrics = Metrics::new().unwrap();

    let out = run_pipeline(&fixture_config(), &renderer, &metrics).unwrap();

    let expected = [
        ((2024, 3, 11), 12.5, 75.0 / 60.0),
        ((2024, 3, 18), 12.0, 70.5 / 60.0),
        ((2024, 3, 25), 21.1, 115.2 / 60.0),
    ];
    assert_eq!(out.weeks.len(), expected.len());
    for (w, ((y, m, d), km, h)) in out.weeks.iter().zip(expected) {
        let monday = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN);
        assert_eq!(w.week, monday);
        assert!((w.distance_km - km).abs() < 1e-9, "km for {monday}");
        assert!((w.time_hours - h).abs() < 1e-9, "timer for {monday}");
    }

    // grafen fikk nøyaktig ukestabellen, én gang
    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], out.weeks);

    assert_eq!(metrics.rows_read.get(), 8);
    assert_eq!(metrics.rows_kept.get(), 4);
    assert_eq!(metrics.rows_skipped.get(), 0);
    assert_eq!(metrics.weeks.get(), 3);
    assert!(metrics.render().unwrap().contains("runload_weeks_total 3"));
}

#[test]
fn schema_report_lists_raw_columns_with_canonical_names() {
    let out = load_weekly(&fixture_config()).unwrap();
    let schema = &out.schema;

    assert_eq!(schema.rows, 8);
    let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"activity_type"));
    assert!(names.contains(&"tss"));
    // ukjent kolonne beholder navnet sitt
    assert!(names.contains(&"Favorite"));

    let tss = schema.columns.iter().find(|c| c.name == "tss").unwrap();
    assert_eq!(tss.non_null, 3);
    assert_eq!(tss.kind.to_string(), "numeric");

    let elapsed = schema.columns.iter().find(|c| c.name == "elapsed_time").unwrap();
    assert_eq!(elapsed.kind.to_string(), "clock");

    let date = schema.columns.iter().find(|c| c.name == "date").unwrap();
    assert_eq!(date.kind.to_string(), "date");

    let text = schema.to_string();
    assert!(text.starts_with("8 rader, 34 kolonner"));
}

#[test]
fn pipeline_is_idempotent() {
    let a = load_weekly(&fixture_config()).unwrap();
    let b = load_weekly(&fixture_config()).unwrap();
    assert_eq!(a.weeks, b.weeks);
    assert_eq!(a.normalized.runs, b.normalized.runs);
}

#[test]
fn no_running_rows_gives_empty_table_and_empty_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Activities.csv");
    fs::write(
        &input,
        "Activity Type,Date,Distance,Calories,Avg HR,Avg Run Cadence,Avg Pace,Best Pace,Avg Stride Length,Elapsed Time,Training Stress Score®\n\
         Cycling,2024-03-11 07:00:00,30.0,700,135,,--,--,,01:10:00,\n\
         Strength Training,2024-03-12 07:00:00,0.0,200,110,,--,--,,00:40:00,\n",
    )
    .unwrap();
    let chart = dir.path().join("weekly.svg");

    let cfg = PipelineConfig {
        input_path: input.to_string_lossy().into_owned(),
        chart_path: chart.to_string_lossy().into_owned(),
        ..PipelineConfig::default()
    };
    let renderer = SvgChartRenderer::new(cfg.chart_path.clone(), 800, 500);
    let metrics = Metrics::new().unwrap();

    let out = run_pipeline(&cfg, &renderer, &metrics).unwrap();
    assert!(out.weeks.is_empty());
    assert_eq!(out.normalized.report.rows_matched, 0);

    let svg = fs::read_to_string(&chart).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn svg_chart_contains_titles_and_legend() {
    let dir = tempfile::tempdir().unwrap();
    let chart = dir.path().join("weekly.svg");

    let cfg = PipelineConfig {
        chart_path: chart.to_string_lossy().into_owned(),
        ..fixture_config()
    };
    let renderer = SvgChartRenderer::new(cfg.chart_path.clone(), cfg.chart_width, cfg.chart_height);
    run_pipeline(&cfg, &renderer, &Metrics::new().unwrap()).unwrap();

    let svg = fs::read_to_string(&chart).unwrap();
    assert!(svg.contains("Weekly distance"));
    assert!(svg.contains("Elapsed time (h)"));
    assert!(svg.contains("Distance (km)"));
    assert!(svg.contains("Week"));
}

#[test]
fn missing_input_file_fails_before_rendering() {
    let renderer = RecordingRenderer::default();
    let cfg = PipelineConfig {
        input_path: "does/not/exist.csv".to_string(),
        ..PipelineConfig::default()
    };

    let err = run_pipeline(&cfg, &renderer, &Metrics::new().unwrap()).unwrap_err();
    assert!(matches!(err, PipelineError::Io { ref path, .. } if path == "does/not/exist.csv"));
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn fail_fast_aborts_and_skip_policy_continues() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Activities.csv");
    fs::write(
        &input,
        "Activity Type,Date,Distance,Calories,Avg HR,Avg Run Cadence,Avg Pace,Best Pace,Avg Stride Length,Elapsed Time,Training Stress Score®\n\
         Running,2024-03-11 07:00:00,5.0,300,150,170,6:00,5:00,1.0,00:30:00,40\n\
         Running,2024-03-12 07:00:00,6.0,350,152,171,--,5:00,1.0,00:36:00,44\n\
         Running,2024-03-13 07:00:00,7.5,420,149,169,6:00,5:00,1.0,00:45:00,50\n",
    )
    .unwrap();
    let path = input.to_string_lossy().into_owned();

    let raw = read_activities(&path, ',').unwrap();
    let err = weekly_load(raw.clone(), ParsePolicy::FailFast).unwrap_err();
    assert_eq!(err.row(), Some(2));

    let (normalized, weeks) = weekly_load(raw, ParsePolicy::SkipAndReport).unwrap();
    assert_eq!(normalized.report.skipped.len(), 1);
    assert_eq!(weeks.len(), 1);
    assert!((weeks[0].distance_km - 12.5).abs() < 1e-12);
    assert!((weeks[0].time_hours - 1.25).abs() < 1e-12);
}

#[test]
fn weekly_table_text_has_totals() {
    let out = load_weekly(&fixture_config()).unwrap();
    let text = format_weekly_table(&out.weeks);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("2024-03-11"));
    assert!(lines[1].contains("12.50"));
    assert!(lines[1].contains("1.25"));
    assert!(lines[4].starts_with("total"));
    assert!(lines[4].contains("45.60"));
}
