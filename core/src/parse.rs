use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

// Formater vi ser i eksporter fra klokker/tjenester. Første treff vinner.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Generell datoparser. Tidssone (RFC 3339) kastes, lokal veggklokketid beholdes.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Tempo som `MM:SS` (ingen timer). Brøkdel av sekund godtas men ignoreres.
pub fn parse_pace(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(&format!("00:{s}"), "%H:%M:%S%.f").ok()
}

/// Varighet som `HH:MM:SS`. To ledd leses som `H:MM` (timer først). Må være under 24 t.
pub fn parse_elapsed(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// timer*60 + minutter + sekunder/60 (hele sekunder).
pub fn clock_minutes(t: NaiveTime) -> f64 {
    (t.hour() * 60 + t.minute()) as f64 + t.second() as f64 / 60.0
}

pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
