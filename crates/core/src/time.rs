use chrono::{DateTime, Duration, Utc};

/// Source of "now" for alert ages and scan timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// `minutes` before `at`.
#[must_use]
pub fn minutes_before(at: DateTime<Utc>, minutes: u32) -> DateTime<Utc> {
    at - Duration::minutes(i64::from(minutes))
}

/// Coarse "N units ago" text for the time between `then` and `now`.
///
/// Instants at or after `now` read as `just now`.
#[must_use]
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(elapsed.num_days(), "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Deterministic timestamp for tests (2026-10-19T12:00:00Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_792_411_200;

/// Returns a deterministic `DateTime<Utc>` for tests.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(FIXED_TEST_TIMESTAMP)
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_now_is_the_documented_instant() {
        assert_eq!(fixed_now().to_rfc3339(), "2026-10-19T12:00:00+00:00");
        assert_eq!(fixed_clock().now(), fixed_now());
    }

    #[test]
    fn relative_label_buckets() {
        let now = fixed_now();
        assert_eq!(relative_label(now, now), "just now");
        assert_eq!(relative_label(now + Duration::hours(1), now), "just now");
        assert_eq!(relative_label(minutes_before(now, 1), now), "1 minute ago");
        assert_eq!(relative_label(minutes_before(now, 45), now), "45 minutes ago");
        assert_eq!(relative_label(minutes_before(now, 120), now), "2 hours ago");
        assert_eq!(relative_label(now - Duration::hours(25), now), "1 day ago");
        assert_eq!(relative_label(now - Duration::days(9), now), "9 days ago");
    }
}
