//! Database utility functions.
//!
//! Temporal columns are stored as TEXT in the same patterns the JSON codec
//! uses, so a value read back formats identically on the wire.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::db::{DbError, DbResult};
use crate::json::format::{DATE_FORMAT, DATETIME_FORMAT, TIME_FORMAT};

/// Get current UTC datetime as string in storage format.
pub fn current_timestamp() -> String {
    Utc::now().format(DATETIME_FORMAT).to_string()
}

fn invalid(column: &str, raw: &str, pattern: &str) -> DbError {
    DbError::InvalidData {
        message: format!("column '{}' holds unparseable value '{}'", column, raw),
        help: format!("Values in '{}' must match {}", column, pattern),
    }
}

pub fn parse_datetime(column: &str, raw: &str) -> DbResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map_err(|_| invalid(column, raw, "yyyy-MM-dd HH:mm:ss"))
}

pub fn parse_date(column: &str, raw: &str) -> DbResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid(column, raw, "yyyy-MM-dd"))
}

pub fn parse_time(column: &str, raw: &str) -> DbResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| invalid(column, raw, "HH:mm:ss"))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_timestamp_round_trips() {
        let now = current_timestamp();
        assert_eq!(now.len(), 19);
        assert!(parse_datetime("created_at", &now).is_ok());
    }

    #[test]
    fn test_parse_rejects_wrong_pattern() {
        let err = parse_date("birthday", "26/03/2025").unwrap_err();
        assert!(err.to_string().contains("birthday"));
        assert!(parse_time("login_time", "9:30").is_err());
        assert!(parse_datetime("created_at", "2025-03-26T16:55:00").is_err());
    }

    #[test]
    fn test_format_matches_parse() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let time = NaiveTime::from_hms_opt(0, 0, 1).unwrap();
        assert_eq!(format_date(&date), "1999-12-31");
        assert_eq!(format_time(&time), "00:00:01");
        assert_eq!(parse_date("d", &format_date(&date)).unwrap(), date);
        assert_eq!(parse_time("t", &format_time(&time)).unwrap(), time);
    }
}
