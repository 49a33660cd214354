use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use log::info;

use crate::types::{NormalizedRun, WeeklyBucket};

/// Mandag 00:00 i uken som inneholder `date` (ISO-uke).
pub fn week_start(date: NaiveDateTime) -> NaiveDateTime {
    let day = date.date();
    let monday = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    monday.and_time(NaiveTime::MIN)
}

/// Summerer distanse og tid per uke. Uker uten løp tas ikke med.
/// Resultatet er sortert stigende på ukestart.
pub fn aggregate_weekly(runs: &[NormalizedRun]) -> Vec<WeeklyBucket> {
    let mut sums: BTreeMap<NaiveDateTime, (f64, f64)> = BTreeMap::new();

    for run in runs {
        let entry = sums.entry(week_start(run.date)).or_insert((0.0, 0.0));
        entry.0 += run.distance;
        entry.1 += run.elapsed_time;
    }

    let weeks: Vec<WeeklyBucket> = sums
        .into_iter()
        .map(|(week, (distance_km, minutes))| WeeklyBucket {
            week,
            distance_km,
            time_hours: minutes / 60.0,
        })
        .collect();

    info!("{} løp fordelt på {} uker", runs.len(), weeks.len());
    weeks
}

/// Totaler over alle uker: (km, timer).
pub fn totals(weeks: &[WeeklyBucket]) -> (f64, f64) {
    weeks
        .iter()
        .fold((0.0, 0.0), |(d, t), w| (d + w.distance_km, t + w.time_hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn week_starts_on_monday_midnight() {
        // 2024-03-13 er en onsdag
        let monday = NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(week_start(at(2024, 3, 13, 18)), monday);
        assert_eq!(week_start(at(2024, 3, 11, 0)), monday);
        // søndag hører til uken før
        assert_eq!(week_start(at(2024, 3, 17, 23)), monday);
        assert_eq!(
            week_start(at(2024, 3, 18, 6)),
            monday + Duration::days(7)
        );
    }

    #[test]
    fn week_crossing_new_year() {
        // 2025-01-01 er onsdag → uken starter mandag 2024-12-30
        let expected = NaiveDate::from_ymd_opt(2024, 12, 30)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(week_start(at(2025, 1, 1, 8)), expected);
    }
}
