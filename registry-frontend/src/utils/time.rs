//! Relative time formatting for artifact pages.

use chrono::{DateTime, Utc};

const SECOND: i64 = 1_000;
const MINUTE: i64 = SECOND * 60;
const HOUR: i64 = MINUTE * 60;
const DAY: i64 = HOUR * 24;
const MONTH: i64 = DAY * 31;
const YEAR: i64 = MONTH * 12;

/// English description of how long ago `since` was, seen from `from`.
///
/// Uses the largest unit the elapsed time exceeds, rounded to the nearest
/// whole unit: "now", "5 seconds ago", "yesterday", "last month", "2 years ago".
pub fn time_since(since: DateTime<Utc>, from: DateTime<Utc>) -> String {
    let diff = (from - since).num_milliseconds();

    let (unit, size) = if diff > YEAR {
        ("year", YEAR)
    } else if diff > MONTH {
        ("month", MONTH)
    } else if diff > DAY {
        ("day", DAY)
    } else if diff > HOUR {
        ("hour", HOUR)
    } else if diff > MINUTE {
        ("minute", MINUTE)
    } else {
        ("second", SECOND)
    };

    let amount = (diff as f64 / size as f64).round() as i64;
    format_relative(amount, unit)
}

fn format_relative(amount: i64, unit: &str) -> String {
    match (amount, unit) {
        (0, "second") => "now".to_string(),
        (0, _) => format!("this {}", unit),
        (1, "day") => "yesterday".to_string(),
        (1, "month") | (1, "year") => format!("last {}", unit),
        (1, _) => format!("1 {} ago", unit),
        (n, _) if n < 0 => format!("in {} {}s", -n, unit),
        (n, _) => format!("{} {}s ago", n, unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(duration: Duration) -> String {
        let now = Utc::now();
        time_since(now - duration, now)
    }

    #[test]
    fn test_seconds() {
        assert_eq!(ago(Duration::zero()), "now");
        assert_eq!(ago(Duration::seconds(1)), "1 second ago");
        assert_eq!(ago(Duration::seconds(45)), "45 seconds ago");
    }

    #[test]
    fn test_larger_units() {
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::hours(30)), "yesterday");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(40)), "last month");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn test_future_dates() {
        let now = Utc::now();
        assert_eq!(time_since(now + Duration::seconds(10), now), "in 10 seconds");
    }
}
