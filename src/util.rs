use crate::error::{GitcalError, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};

/// Days from the last Saturday through `today`, inclusive of `today`.
///
/// Sunday is 1 and Saturday is 7. The newest week column holds exactly this many
/// days and today's row in the calendar is `weekday_offset(today) - 1`.
pub fn weekday_offset(today: NaiveDate) -> u8 {
    today.weekday().num_days_from_sunday() as u8 + 1
}

/// Row of `day` in a week column, Sunday = 0.
pub fn weekday_row(day: NaiveDate) -> u8 {
    day.weekday().num_days_from_sunday() as u8
}

/// Sunday that starts the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(weekday_row(day)))
}

/// Resolve the `--as-of` argument: RFC3339, `YYYY-MM-DD`, or a duration such as `3weeks`
/// counted back from `now`.
pub fn parse_as_of(input: &str, now: DateTime<Local>) -> Result<DateTime<Local>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        // Noon never falls into a DST gap.
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| GitcalError::InvalidDate(input.to_string()))?;
        return Local
            .from_local_datetime(&noon)
            .earliest()
            .ok_or_else(|| GitcalError::InvalidDate(input.to_string()));
    }

    let ago = humantime::parse_duration(input)
        .map_err(|e| GitcalError::InvalidDate(format!("'{input}': {e}")))?;
    let ago = Duration::from_std(ago)
        .map_err(|_| GitcalError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    now.checked_sub_signed(ago)
        .ok_or_else(|| GitcalError::InvalidDate(format!("Duration overflow for '{input}'")))
}

/// Spinner on stderr; indicatif hides it when stderr is not a terminal.
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_offset_counts_from_saturday() {
        // 2024-05-12 is a Sunday
        assert_eq!(weekday_offset(date(2024, 5, 12)), 1);
        assert_eq!(weekday_offset(date(2024, 5, 15)), 4);
        assert_eq!(weekday_offset(date(2024, 5, 18)), 7);
    }

    #[test]
    fn week_start_is_sunday() {
        assert_eq!(week_start(date(2024, 5, 15)), date(2024, 5, 12));
        assert_eq!(week_start(date(2024, 5, 12)), date(2024, 5, 12));
        assert_eq!(week_start(date(2024, 5, 18)), date(2024, 5, 12));
        assert_eq!(week_start(date(2024, 3, 1)), date(2024, 2, 25));
    }

    #[test]
    fn parse_as_of_accepts_calendar_dates() {
        let now = Local::now();
        let parsed = parse_as_of("2024-05-15", now).unwrap();
        assert_eq!(parsed.date_naive(), date(2024, 5, 15));
    }

    #[test]
    fn parse_as_of_accepts_durations() {
        let now = Local::now();
        let parsed = parse_as_of("2days", now).unwrap();
        assert_eq!(now - parsed, Duration::days(2));
    }

    #[test]
    fn parse_as_of_rejects_garbage() {
        assert!(matches!(
            parse_as_of("next tuesday-ish", Local::now()),
            Err(GitcalError::InvalidDate(_))
        ));
    }
}
