// Helpers for the app's `dd.MM` date strings
use chrono::{Datelike, Local, NaiveDate};

pub fn today_day_month() -> String {
    Local::now().format("%d.%m").to_string()
}

/// Parse a `dd.MM` string into a date in the current year.
pub fn parse_day_month(s: &str) -> Option<NaiveDate> {
    let (day, month) = s.trim().split_once('.')?;
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(Local::now().year(), month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_day_and_month_in_current_year() {
        let date = parse_day_month("15.09").unwrap();
        assert_eq!(date.day(), 15);
        assert_eq!(date.month(), 9);
        assert_eq!(date.year(), Local::now().year());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_day_month("15/09").is_none());
        assert!(parse_day_month("99.99").is_none());
        assert!(parse_day_month("").is_none());
    }

    #[test]
    fn formats_today_as_day_dot_month() {
        let s = today_day_month();
        assert_eq!(s.len(), 5);
        assert_eq!(s.as_bytes()[2], b'.');
    }
}
