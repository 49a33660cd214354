use crate::models::SchemaReport;
use crate::types::{NormalizeReport, WeeklyBucket};
use crate::weekly::totals;

pub fn print_schema_report(schema: &SchemaReport) {
    println!("--- Schema (rå eksport) ---");
    print!("{schema}");
}

pub fn print_normalize_report(report: &NormalizeReport) {
    println!("--- Normalisering ---");
    println!("Rader lest: {}", report.rows_read);
    println!("Løp (\"run\"): {}", report.rows_matched);
    println!("Normalisert: {}", report.rows_normalized);
    for s in &report.skipped {
        println!("Hoppet over rad {}: {}", s.row, s.reason);
    }
}

/// Ukestabell som tekst: uke, km, timer.
pub fn format_weekly_table(weeks: &[WeeklyBucket]) -> String {
    let mut out = format!("{:<12} {:>12} {:>11}\n", "week", "distance_km", "time_hours");
    for w in weeks {
        out.push_str(&format!(
            "{:<12} {:>12.2} {:>11.2}\n",
            w.week.format("%Y-%m-%d"),
            w.distance_km,
            w.time_hours
        ));
    }
    let (km, h) = totals(weeks);
    out.push_str(&format!("{:<12} {:>12.2} {:>11.2}\n", "total", km, h));
    out
}

pub fn print_weekly_report(weeks: &[WeeklyBucket]) {
    println!("--- Weekly Report ---");
    print!("{}", format_weekly_table(weeks));
}
