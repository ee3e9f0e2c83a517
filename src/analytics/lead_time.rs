//! Lead-time arithmetic shared by every calculator.
//!
//! A *lead day* is the whole number of days between an event's start
//! date and some timestamp, positive before the start. All date
//! comparisons in the engine — "has the event started", "days
//! remaining", bucket indices — flow through [`LeadWindow`] so the
//! started/not-started branching lives in exactly one place.

use chrono::{DateTime, Duration, Utc};

use crate::domain::Event;

/// Floor day difference of a duration, in whole days.
///
/// Floors toward negative infinity: a span of −12 hours is day −1, not
/// day 0, which keeps post-start records out of the day-0 bucket.
#[must_use]
pub fn days_floor(delta: Duration) -> i64 {
    delta.num_seconds().div_euclid(86_400)
}

/// The lead-time window of one event: from its creation to its start.
#[derive(Debug, Clone, Copy)]
pub struct LeadWindow {
    created_at: DateTime<Utc>,
    start_date: DateTime<Utc>,
}

impl LeadWindow {
    /// Builds a window from explicit bounds.
    #[must_use]
    pub const fn new(created_at: DateTime<Utc>, start_date: DateTime<Utc>) -> Self {
        Self {
            created_at,
            start_date,
        }
    }

    /// Lead days of an arbitrary timestamp relative to the start date.
    /// Negative once the timestamp is past the start.
    #[must_use]
    pub fn lead_days(&self, at: DateTime<Utc>) -> i64 {
        days_floor(self.start_date - at)
    }

    /// Lead days available at event creation — the widest the chart
    /// domain can be. Events are created before they start, so this is
    /// zero or positive for well-formed data.
    #[must_use]
    pub fn max_lead(&self) -> i64 {
        days_floor(self.start_date - self.created_at)
    }

    /// Whole days until the start, clamped at zero once the event has
    /// started. Doubles as the chart-domain floor while the event is
    /// still upcoming.
    #[must_use]
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        self.lead_days(now).max(0)
    }

    /// `true` while the event has not started yet.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.start_date
    }

    /// Days the event has been accepting registrations: from creation to
    /// `now`, capped at the start date once the event is underway. Zero
    /// or negative means "no meaningful elapsed period yet".
    #[must_use]
    pub fn elapsed_days(&self, now: DateTime<Utc>) -> i64 {
        days_floor(now.min(self.start_date) - self.created_at)
    }
}

impl From<&Event> for LeadWindow {
    fn from(event: &Event) -> Self {
        Self::new(event.created_at, event.start_date)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    #[test]
    fn days_floor_floors_toward_negative_infinity() {
        assert_eq!(days_floor(Duration::hours(36)), 1);
        assert_eq!(days_floor(Duration::hours(-12)), -1);
        assert_eq!(days_floor(Duration::zero()), 0);
    }

    #[test]
    fn lead_days_count_down_to_start() {
        let window = LeadWindow::new(ts(1, 0), ts(11, 0));
        assert_eq!(window.max_lead(), 10);
        assert_eq!(window.lead_days(ts(3, 0)), 8);
        assert_eq!(window.lead_days(ts(11, 0)), 0);
        assert_eq!(window.lead_days(ts(12, 0)), -1);
    }

    #[test]
    fn days_remaining_clamps_after_start() {
        let window = LeadWindow::new(ts(1, 0), ts(5, 0));
        assert_eq!(window.days_remaining(ts(2, 0)), 3);
        assert_eq!(window.days_remaining(ts(8, 0)), 0);
    }

    #[test]
    fn is_active_flips_exactly_at_start() {
        let window = LeadWindow::new(ts(1, 0), ts(5, 12));
        assert!(window.is_active(ts(5, 11)));
        assert!(!window.is_active(ts(5, 12)));
    }

    #[test]
    fn elapsed_days_caps_at_start_date() {
        let window = LeadWindow::new(ts(1, 0), ts(5, 0));
        // Still upcoming: counts creation → now.
        assert_eq!(window.elapsed_days(ts(3, 0)), 2);
        // Already started: counts creation → start, however late `now` is.
        assert_eq!(window.elapsed_days(ts(20, 0)), 4);
    }
}
