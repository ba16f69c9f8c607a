pub mod baby;
pub mod config;
pub mod cry;
pub mod log;
pub mod reminder;
pub mod stats;
pub mod suggest;
pub mod timeline;
pub mod tips;

use babycare_core::{BabyProfile, CareDb};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve `--baby` by id or name; without it, the only baby on record.
pub(crate) fn resolve_baby(
    db: &CareDb,
    baby: Option<&str>,
) -> Result<BabyProfile, Box<dyn std::error::Error>> {
    if let Some(key) = baby {
        return Ok(db.find_baby(key)?);
    }
    let mut babies = db.list_babies()?;
    match babies.len() {
        0 => Err("no babies yet, add one with `babycare baby add`".into()),
        1 => Ok(babies.remove(0)),
        _ => Err("several babies on record, pick one with --baby <id|name>".into()),
    }
}

/// Parse a point in time given on the command line.
///
/// Accepts `now`, a relative offset into the past (`-45m`, `-2h`, `-1d`),
/// `YYYY-MM-DD HH:MM` (UTC) or full RFC 3339.
pub(crate) fn parse_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if input == "now" {
        return Ok(now);
    }
    if let Some(offset) = input.strip_prefix('-') {
        let mut chars = offset.chars();
        let unit = chars.next_back();
        let amount: i64 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("invalid relative time '{input}'"))?;
        let delta = match unit {
            Some('m') => Duration::try_minutes(amount),
            Some('h') => Duration::try_hours(amount),
            Some('d') => Duration::try_days(amount),
            _ => return Err(format!("invalid relative time '{input}', use m, h or d")),
        };
        return delta
            .and_then(|delta| now.checked_sub_signed(delta))
            .ok_or_else(|| format!("relative time '{input}' is out of range"));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!(
        "invalid time '{input}', expected now, -30m, 'YYYY-MM-DD HH:MM' or RFC 3339"
    ))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{input}', expected YYYY-MM-DD"))
}

pub(crate) fn format_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn parse_relative_times() {
        assert_eq!(parse_time("now", now()).unwrap(), now());
        assert_eq!(parse_time("-45m", now()).unwrap(), now() - Duration::minutes(45));
        assert_eq!(parse_time("-2h", now()).unwrap(), now() - Duration::hours(2));
        assert_eq!(parse_time("-1d", now()).unwrap(), now() - Duration::days(1));
        assert!(parse_time("-2w", now()).is_err());
        assert!(parse_time("-", now()).is_err());
    }

    #[test]
    fn parse_relative_time_out_of_range() {
        assert!(parse_time("-100000000d", now()).is_err());
        assert!(parse_time("-9000000000000000000m", now()).is_err());
    }

    #[test]
    fn parse_absolute_times() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 2, 22, 15, 0).unwrap();
        assert_eq!(parse_time("2024-03-02 22:15", now()).unwrap(), expected);
        assert_eq!(parse_time("2024-03-02T22:15", now()).unwrap(), expected);
        assert_eq!(parse_time("2024-03-02T23:15:00+01:00", now()).unwrap(), expected);
        assert!(parse_time("yesterday", now()).is_err());
    }

    #[test]
    fn parse_dates() {
        assert_eq!(parse_date("2024-01-31").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert!(parse_date("31/01/2024").is_err());
    }
}
