//! Scalar KPIs derived from an event's registrations and transactions.
//!
//! Every function takes `now` explicitly where the clock matters; the
//! engine owns no clock of its own. Division-by-zero and
//! already-started cases all collapse to `0.0` rather than erroring —
//! a dashboard card with a zero beats a failed request.

use chrono::{DateTime, Utc};

use super::lead_time::LeadWindow;
use super::money;
use crate::domain::Transaction;

/// Average registrations per elapsed day, rounded to 2 decimals.
///
/// The elapsed period runs from event creation to `now`, capped at the
/// start date once the event is underway. Returns `0.0` when no full
/// day has elapsed yet.
#[must_use]
pub fn average_per_day(window: &LeadWindow, now: DateTime<Utc>, registration_count: u64) -> f64 {
    let elapsed = window.elapsed_days(now);
    if elapsed <= 0 {
        return 0.0;
    }
    money::round2(registration_count as f64 / elapsed as f64)
}

/// Registrations needed per remaining day to hit the target, rounded to
/// 1 decimal.
///
/// `0.0` once the event has started or when no whole day remains; a
/// target already met also yields `0.0`.
#[must_use]
pub fn daily_target(
    window: &LeadWindow,
    now: DateTime<Utc>,
    target: u32,
    current_count: u64,
) -> f64 {
    if !window.is_active(now) {
        return 0.0;
    }
    let remaining_days = window.days_remaining(now);
    if remaining_days <= 0 {
        return 0.0;
    }
    let needed = u64::from(target).saturating_sub(current_count);
    money::round1(needed as f64 / remaining_days as f64)
}

/// Mean normalized amount across credit transactions, rounded to 2
/// decimals — the effective ticket price. `0.0` when no credits exist.
#[must_use]
pub fn ticket_price(transactions: &[Transaction]) -> f64 {
    let credits: Vec<f64> = transactions
        .iter()
        .filter(|tx| tx.credit)
        .map(|tx| money::parse_amount(&tx.amount))
        .collect();
    if credits.is_empty() {
        return 0.0;
    }
    money::round2(credits.iter().sum::<f64>() / credits.len() as f64)
}

/// Sum of signed amounts across all revenue-eligible transactions,
/// rounded to 2 decimals. Debits subtract; the total can go negative.
#[must_use]
pub fn total_revenue(transactions: &[Transaction]) -> f64 {
    let sum: f64 = transactions
        .iter()
        .map(|tx| money::signed_amount(money::parse_amount(&tx.amount), tx.credit))
        .sum();
    money::round2(sum)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventId;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    fn tx(amount: &str, credit: bool) -> Transaction {
        Transaction {
            registration_id: 0,
            event_id: EventId::new(1),
            amount: amount.to_string(),
            credit,
            occurred_at: ts(2),
        }
    }

    #[test]
    fn average_divides_by_elapsed_days() {
        let window = LeadWindow::new(ts(1), ts(11));
        assert_eq!(average_per_day(&window, ts(5), 10), 2.5);
    }

    #[test]
    fn average_is_zero_before_a_day_has_elapsed() {
        let window = LeadWindow::new(ts(1), ts(11));
        assert_eq!(average_per_day(&window, ts(1), 10), 0.0);
    }

    #[test]
    fn average_uses_start_date_once_underway() {
        let window = LeadWindow::new(ts(1), ts(6));
        // Elapsed caps at 5 days no matter how late we look.
        assert_eq!(average_per_day(&window, ts(26), 10), 2.0);
    }

    #[test]
    fn daily_target_spreads_the_shortfall() {
        let window = LeadWindow::new(ts(1), ts(11));
        // 100-goal event with 40 registered and 6 days to go.
        assert_eq!(daily_target(&window, ts(5), 100, 40), 10.0);
    }

    #[test]
    fn daily_target_rounds_to_one_decimal() {
        let window = LeadWindow::new(ts(1), ts(11));
        // 50 needed over 6 remaining days = 8.33...
        assert_eq!(daily_target(&window, ts(5), 50, 0), 8.3);
    }

    #[test]
    fn daily_target_is_zero_once_started_or_met() {
        let window = LeadWindow::new(ts(1), ts(6));
        assert_eq!(daily_target(&window, ts(7), 100, 0), 0.0);
        assert_eq!(daily_target(&window, ts(3), 10, 25), 0.0);
    }

    #[test]
    fn ticket_price_averages_credits_only() {
        let txs = vec![tx("10,00", true), tx("20,00", true), tx("5,00", false)];
        assert_eq!(ticket_price(&txs), 15.0);
    }

    #[test]
    fn ticket_price_without_credits_is_zero() {
        let txs = vec![tx("5,00", false)];
        assert_eq!(ticket_price(&txs), 0.0);
        assert_eq!(ticket_price(&[]), 0.0);
    }

    #[test]
    fn total_revenue_sums_signed_amounts() {
        let txs = vec![tx("10,50", true), tx("2,00", false)];
        assert_eq!(total_revenue(&txs), 8.5);
    }

    #[test]
    fn total_revenue_tolerates_malformed_amounts() {
        let txs = vec![tx("10,50", true), tx("n/a", true)];
        assert_eq!(total_revenue(&txs), 10.5);
    }
}
