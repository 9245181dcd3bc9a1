//! "Updated" labels for cards and the detail modal

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parse an upstream timestamp: RFC 3339, naive date-time, or plain date (UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Short label used on grid cards.
///
/// Whole days are floored, so a timestamp in the future gives a negative
/// difference and lands on the absolute date form.
pub fn format_list_date(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(updated) = timestamp.and_then(parse_timestamp) else {
        return String::new();
    };

    let days = (now - updated).num_milliseconds().div_euclid(MS_PER_DAY);
    match days {
        0 => "Updated today".to_string(),
        1 => "Updated yesterday".to_string(),
        2..=30 => format!("Updated {} days ago", days),
        _ => format!("Updated on {}", updated.format("%b %-d, %Y")),
    }
}

/// Long label used in the detail modal. Empty when there is no timestamp.
pub fn format_modal_date(timestamp: Option<&str>) -> String {
    match timestamp.and_then(parse_timestamp) {
        Some(updated) => format!("Last updated: {}", updated.format("%B %-d, %Y")),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        (now() - d).to_rfc3339()
    }

    #[test]
    fn test_list_today_and_yesterday() {
        assert_eq!(format_list_date(Some(now().to_rfc3339().as_str()), now()), "Updated today");
        assert_eq!(format_list_date(Some(ago(Duration::hours(23)).as_str()), now()), "Updated today");
        assert_eq!(format_list_date(Some(ago(Duration::days(1)).as_str()), now()), "Updated yesterday");
    }

    #[test]
    fn test_list_days_ago() {
        assert_eq!(format_list_date(Some(ago(Duration::days(2)).as_str()), now()), "Updated 2 days ago");
        assert_eq!(format_list_date(Some(ago(Duration::days(15)).as_str()), now()), "Updated 15 days ago");
        assert_eq!(format_list_date(Some(ago(Duration::days(30)).as_str()), now()), "Updated 30 days ago");
    }

    #[test]
    fn test_list_absolute_date() {
        assert_eq!(
            format_list_date(Some(ago(Duration::days(60)).as_str()), now()),
            "Updated on Jan 15, 2024"
        );
        assert_eq!(
            format_list_date(Some("2022-11-03T07:00:00.000Z"), now()),
            "Updated on Nov 3, 2022"
        );
    }

    #[test]
    fn test_list_future_falls_through() {
        let future = (now() + Duration::days(3)).to_rfc3339();
        assert_eq!(format_list_date(Some(future.as_str()), now()), "Updated on Mar 18, 2024");

        // Less than a day ahead still floors to -1
        let soon = (now() + Duration::hours(1)).to_rfc3339();
        assert_eq!(format_list_date(Some(soon.as_str()), now()), "Updated on Mar 15, 2024");
    }

    #[test]
    fn test_list_missing_or_garbage() {
        assert_eq!(format_list_date(None, now()), "");
        assert_eq!(format_list_date(Some(""), now()), "");
        assert_eq!(format_list_date(Some("last tuesday"), now()), "");
    }

    #[test]
    fn test_modal_date() {
        assert_eq!(
            format_modal_date(Some("2022-11-03T07:00:00.000Z")),
            "Last updated: November 3, 2022"
        );
        assert_eq!(format_modal_date(Some("2023-01-10")), "Last updated: January 10, 2023");
        assert_eq!(format_modal_date(Some("")), "");
        assert_eq!(format_modal_date(None), "");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_timestamp("2022-11-03T07:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 11, 3, 7, 0, 0).unwrap());
    }
}
