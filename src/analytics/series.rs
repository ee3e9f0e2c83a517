//! Time-bucket aggregation: cumulative lead-day series for charts.
//!
//! Both chart series are indexed by lead day relative to one event's
//! start date. Registrations accumulate as lead days shrink (the series
//! is presented descending, the way the dashboard reads it); revenue is
//! presented ascending with each bucket holding everything accrued at
//! equal or greater lead — so moving toward the event start walks the
//! running total down to bucket zero.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::lead_time::LeadWindow;
use super::money;
use crate::domain::{Registration, Transaction};

/// Cumulative registration counts, lead day descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountSeries {
    /// Lead days, from the widest lead down to the chart floor.
    pub remaining_days: Vec<i64>,
    /// Cumulative registration count per lead day.
    pub counts: Vec<u64>,
}

/// Cumulative signed revenue, lead day ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueSeries {
    /// Lead days `0..=max_lead`.
    pub remaining_days: Vec<i64>,
    /// Signed revenue accrued at lead `>= day`, rounded to 2 decimals.
    pub amounts: Vec<f64>,
}

/// Buckets registrations into a cumulative series over the event's
/// lead-time window.
///
/// The domain runs from the window's maximum lead down to the current
/// remaining days while the event is upcoming, or down to zero once it
/// has started. Each bucket counts registrations with lead greater than
/// or equal to that day; the final bucket is force-set to the true total
/// so records falling outside the computed floor are never lost. An
/// empty registration set yields an empty series, not a zero bucket.
#[must_use]
pub fn registration_series(
    window: &LeadWindow,
    now: DateTime<Utc>,
    registrations: &[Registration],
) -> CountSeries {
    if registrations.is_empty() {
        return CountSeries::default();
    }

    let max_lead = window.max_lead();
    let floor = window.days_remaining(now);
    if floor > max_lead {
        return CountSeries::default();
    }

    let mut per_day: HashMap<i64, u64> = HashMap::new();
    for reg in registrations {
        *per_day.entry(window.lead_days(reg.created_at)).or_insert(0) += 1;
    }

    let len = usize::try_from(max_lead - floor + 1).unwrap_or(0);
    let mut remaining_days = Vec::with_capacity(len);
    let mut counts = Vec::with_capacity(len);
    let mut running = 0u64;
    for day in (floor..=max_lead).rev() {
        running += per_day.get(&day).copied().unwrap_or(0);
        remaining_days.push(day);
        counts.push(running);
    }

    // Records with leads outside the walked range (clock skew, late
    // registrations) still belong in the final tally.
    if let Some(last) = counts.last_mut() {
        *last = registrations.len() as u64;
    }

    CountSeries {
        remaining_days,
        counts,
    }
}

/// Buckets signed transaction amounts into a cumulative revenue series.
///
/// Daily signed sums over leads within `[0, max_lead]` are
/// reverse-cumulative-summed, so the bucket at lead `d` carries the
/// revenue of every transaction at lead `>= d`. Post-start transactions
/// (negative lead) fall outside every bucket but still count toward the
/// scalar total-revenue KPI. Amounts are rounded to 2 decimals here, at
/// the externalization point only.
#[must_use]
pub fn revenue_series(window: &LeadWindow, transactions: &[Transaction]) -> RevenueSeries {
    if transactions.is_empty() {
        return RevenueSeries::default();
    }

    let max_lead = window.max_lead();
    if max_lead < 0 {
        return RevenueSeries::default();
    }

    let mut per_day: HashMap<i64, f64> = HashMap::new();
    for tx in transactions {
        let lead = window.lead_days(tx.occurred_at);
        if (0..=max_lead).contains(&lead) {
            let signed = money::signed_amount(money::parse_amount(&tx.amount), tx.credit);
            *per_day.entry(lead).or_insert(0.0) += signed;
        }
    }

    let len = usize::try_from(max_lead + 1).unwrap_or(0);
    let mut suffix = Vec::with_capacity(len);
    let mut running = 0.0;
    for day in (0..=max_lead).rev() {
        running += per_day.get(&day).copied().unwrap_or(0.0);
        suffix.push(running);
    }
    suffix.reverse();

    RevenueSeries {
        remaining_days: (0..=max_lead).collect(),
        amounts: suffix.into_iter().map(money::round2).collect(),
    }
}
