//! Analytics facade: org-scoped queries over the current snapshot.
//!
//! Composes the engine modules per request: resolve the event inside
//! the organization's scope, run the calculators against the snapshot's
//! rows, and assemble the externally visible views. Event ids enter and
//! leave as opaque public codes — raw keys stay inside.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::analytics::{CountSeries, FieldDistribution, LeadWindow, RevenueSeries, kpi, series};
use crate::analytics::fields as dynamic_fields;
use crate::auth::EventCodec;
use crate::domain::{DatasetSnapshot, Event, OrgId, SnapshotStore};
use crate::error::AnalyticsError;

/// Sidebar summary of one event.
#[derive(Debug, Clone)]
pub struct EventSummary {
    /// Opaque public event id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// Registration goal.
    pub target_registrations: u32,
}

/// Registration analytics for one event.
#[derive(Debug, Clone)]
pub struct RegistrationView {
    /// Opaque public event id.
    pub id: String,
    /// Cumulative registration series, lead day descending.
    pub series: CountSeries,
    /// Current counted registrations.
    pub current_count: u64,
    /// Average registrations per elapsed day.
    pub average_per_day: f64,
    /// Registration goal.
    pub target: u32,
}

/// Revenue analytics for one event.
#[derive(Debug, Clone)]
pub struct RevenueView {
    /// Opaque public event id.
    pub id: String,
    /// Cumulative signed revenue series, lead day ascending.
    pub series: RevenueSeries,
    /// Mean credit amount — the effective ticket price.
    pub ticket_price: f64,
    /// Signed revenue total.
    pub total_revenue: f64,
}

/// Combined per-event view for dashboard preloading.
#[derive(Debug, Clone)]
pub struct EventDetails {
    /// Opaque public event id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Registration analytics.
    pub registrations: RegistrationView,
    /// Revenue analytics.
    pub revenue: RevenueView,
    /// Whole days until the start, zero once underway.
    pub days_remaining: i64,
    /// Registrations needed per remaining day to hit the target.
    pub daily_target: f64,
    /// `true` while the event has not started.
    pub is_active: bool,
}

/// Orchestration layer for all analytics queries.
///
/// Stateless between requests: every query clones the current snapshot
/// handle, computes, and drops it. Holds the event-id codec so public
/// codes are translated exactly once, here at the facade.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    store: Arc<SnapshotStore>,
    codec: EventCodec,
}

impl AnalyticsService {
    /// Creates a new `AnalyticsService`.
    #[must_use]
    pub fn new(store: Arc<SnapshotStore>, codec: EventCodec) -> Self {
        Self { store, codec }
    }

    /// Summaries of the organization's events, in listing order. An
    /// unresolvable org scope simply lists nothing.
    pub async fn list_events(&self, org_id: OrgId) -> Vec<EventSummary> {
        let snapshot = self.store.load().await;
        snapshot
            .events_for_org(org_id)
            .map(|event| EventSummary {
                id: self.codec.encode(event.id),
                name: event.name.clone(),
                created_at: event.created_at,
                start_date: event.start_date,
                target_registrations: event.target_registrations,
            })
            .collect()
    }

    /// Registration analytics for one event.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EventNotFound`] when the public code
    /// does not decode or does not resolve within the org scope. An
    /// event with no registrations yields a zero-valued view.
    pub async fn event_registrations(
        &self,
        org_id: OrgId,
        code: &str,
    ) -> Result<RegistrationView, AnalyticsError> {
        let snapshot = self.store.load().await;
        let event = self.resolve(&snapshot, org_id, code)?;
        Ok(self.registrations_for(&snapshot, event, Utc::now()))
    }

    /// Revenue analytics for one event.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EventNotFound`] when the public code
    /// does not resolve within the org scope. An event with no
    /// transactions yields a zero-valued view.
    pub async fn event_revenue(
        &self,
        org_id: OrgId,
        code: &str,
    ) -> Result<RevenueView, AnalyticsError> {
        let snapshot = self.store.load().await;
        let event = self.resolve(&snapshot, org_id, code)?;
        Ok(self.revenue_for(&snapshot, event))
    }

    /// Dynamic-field answer distribution for one event.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EventNotFound`] when the public code
    /// does not resolve within the org scope.
    pub async fn field_distribution(
        &self,
        org_id: OrgId,
        code: &str,
    ) -> Result<FieldDistribution, AnalyticsError> {
        let snapshot = self.store.load().await;
        let event = self.resolve(&snapshot, org_id, code)?;
        Ok(dynamic_fields::field_distribution(
            snapshot.fields(event.id),
            snapshot.registrations(event.id),
        ))
    }

    /// Combined registration + revenue view for one event, used by the
    /// bulk preload endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EventNotFound`] when the public code
    /// does not resolve within the org scope.
    pub async fn event_details(
        &self,
        org_id: OrgId,
        code: &str,
    ) -> Result<EventDetails, AnalyticsError> {
        let snapshot = self.store.load().await;
        let event = self.resolve(&snapshot, org_id, code)?;
        let now = Utc::now();
        let window = LeadWindow::from(event);

        let registrations = self.registrations_for(&snapshot, event, now);
        let current_count = registrations.current_count;

        Ok(EventDetails {
            id: self.codec.encode(event.id),
            name: event.name.clone(),
            registrations,
            revenue: self.revenue_for(&snapshot, event),
            days_remaining: window.days_remaining(now),
            daily_target: kpi::daily_target(&window, now, event.target_registrations, current_count),
            is_active: window.is_active(now),
        })
    }

    fn registrations_for(
        &self,
        snapshot: &DatasetSnapshot,
        event: &Event,
        now: DateTime<Utc>,
    ) -> RegistrationView {
        let window = LeadWindow::from(event);
        let registrations = snapshot.registrations(event.id);
        let current_count = registrations.len() as u64;

        RegistrationView {
            id: self.codec.encode(event.id),
            series: series::registration_series(&window, now, registrations),
            current_count,
            average_per_day: kpi::average_per_day(&window, now, current_count),
            target: event.target_registrations,
        }
    }

    fn revenue_for(&self, snapshot: &DatasetSnapshot, event: &Event) -> RevenueView {
        let window = LeadWindow::from(event);
        let transactions = snapshot.transactions(event.id);

        RevenueView {
            id: self.codec.encode(event.id),
            series: series::revenue_series(&window, transactions),
            ticket_price: kpi::ticket_price(transactions),
            total_revenue: kpi::total_revenue(transactions),
        }
    }

    fn resolve<'a>(
        &self,
        snapshot: &'a DatasetSnapshot,
        org_id: OrgId,
        code: &str,
    ) -> Result<&'a Event, AnalyticsError> {
        self.codec
            .decode(code)
            .and_then(|event_id| snapshot.event(org_id, event_id))
            .ok_or_else(|| AnalyticsError::EventNotFound(code.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventId, FieldDefinition, Registration, Transaction};
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    fn codec() -> EventCodec {
        let Ok(codec) = EventCodec::new("service-test-salt") else {
            panic!("codec construction failed");
        };
        codec
    }

    fn fixture_service() -> AnalyticsService {
        let events = vec![
            Event {
                id: EventId::new(1),
                org_id: OrgId::new(10),
                name: "Spring Conference".to_string(),
                created_at: ts(1),
                start_date: ts(11),
                target_registrations: 100,
            },
            Event {
                id: EventId::new(2),
                org_id: OrgId::new(10),
                name: "Autumn Retreat".to_string(),
                created_at: ts(1),
                start_date: ts(21),
                target_registrations: 0,
            },
            Event {
                id: EventId::new(3),
                org_id: OrgId::new(20),
                name: "Foreign Org Gala".to_string(),
                created_at: ts(1),
                start_date: ts(11),
                target_registrations: 50,
            },
        ];
        let registrations = vec![
            Registration {
                id: 100,
                event_id: EventId::new(1),
                created_at: ts(3),
                answers_serial: "7: Blue".to_string(),
            },
            Registration {
                id: 101,
                event_id: EventId::new(1),
                created_at: ts(6),
                answers_serial: "7: Red".to_string(),
            },
        ];
        let transactions = vec![
            Transaction {
                registration_id: 100,
                event_id: EventId::new(1),
                amount: "10,50".to_string(),
                credit: true,
                occurred_at: ts(3),
            },
            Transaction {
                registration_id: 101,
                event_id: EventId::new(1),
                amount: "2,00".to_string(),
                credit: false,
                occurred_at: ts(6),
            },
        ];
        let fields = vec![FieldDefinition {
            id: 7,
            event_id: EventId::new(1),
            label: "Shirt color".to_string(),
        }];

        let snapshot = DatasetSnapshot::new(events, registrations, transactions, fields);
        AnalyticsService::new(Arc::new(SnapshotStore::new(snapshot)), codec())
    }

    fn code_for(service: &AnalyticsService, id: i64) -> String {
        service.codec.encode(EventId::new(id))
    }

    #[tokio::test]
    async fn listing_is_scoped_and_name_ordered() {
        let service = fixture_service();
        let events = service.list_events(OrgId::new(10)).await;
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Autumn Retreat", "Spring Conference"]);
    }

    #[tokio::test]
    async fn sentinel_org_lists_nothing() {
        let service = fixture_service();
        assert!(service.list_events(OrgId::EMPTY).await.is_empty());
    }

    #[tokio::test]
    async fn foreign_org_event_is_not_found() {
        let service = fixture_service();
        let foreign = code_for(&service, 3);
        let result = service.event_registrations(OrgId::new(10), &foreign).await;
        assert!(matches!(result, Err(AnalyticsError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn undecodable_code_is_not_found() {
        let service = fixture_service();
        let result = service
            .event_revenue(OrgId::new(10), "!!garbage!!")
            .await;
        assert!(matches!(result, Err(AnalyticsError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn registrations_view_carries_counts_and_series() {
        let service = fixture_service();
        let code = code_for(&service, 1);
        let Ok(view) = service.event_registrations(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };

        assert_eq!(view.current_count, 2);
        assert_eq!(view.target, 100);
        assert_eq!(view.series.counts.last().copied(), Some(2));
        assert_eq!(view.id, code);
    }

    #[tokio::test]
    async fn empty_event_yields_zero_views_not_errors() {
        let service = fixture_service();
        let code = code_for(&service, 2);

        let Ok(regs) = service.event_registrations(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };
        assert_eq!(regs.current_count, 0);
        assert_eq!(regs.average_per_day, 0.0);
        assert!(regs.series.remaining_days.is_empty());

        let Ok(revenue) = service.event_revenue(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };
        assert_eq!(revenue.total_revenue, 0.0);
        assert_eq!(revenue.ticket_price, 0.0);
        assert!(revenue.series.amounts.is_empty());
    }

    #[tokio::test]
    async fn revenue_matches_the_signed_sum() {
        let service = fixture_service();
        let code = code_for(&service, 1);
        let Ok(view) = service.event_revenue(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };

        assert_eq!(view.total_revenue, 8.5);
        assert_eq!(view.ticket_price, 10.5);
        assert_eq!(view.series.amounts.first().copied(), Some(8.5));
    }

    #[tokio::test]
    async fn field_distribution_reaches_the_analyzer() {
        let service = fixture_service();
        let code = code_for(&service, 1);
        let Ok(dist) = service.field_distribution(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };

        assert_eq!(dist.labels, ["Shirt color"]);
        assert!(dist.distribution.contains_key("Shirt color"));
    }

    #[tokio::test]
    async fn repeated_queries_are_idempotent() {
        let service = fixture_service();
        let code = code_for(&service, 1);

        let Ok(first) = service.event_revenue(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };
        let Ok(second) = service.event_revenue(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };

        assert_eq!(first.series.amounts, second.series.amounts);
        assert_eq!(first.total_revenue, second.total_revenue);
    }

    #[tokio::test]
    async fn details_compose_both_views() {
        let service = fixture_service();
        let code = code_for(&service, 1);
        let Ok(details) = service.event_details(OrgId::new(10), &code).await else {
            panic!("event should resolve");
        };

        assert_eq!(details.name, "Spring Conference");
        assert_eq!(details.registrations.current_count, 2);
        assert_eq!(details.revenue.total_revenue, 8.5);
        // The fixture event started in 2024; nothing remains of it.
        assert!(!details.is_active);
        assert_eq!(details.days_remaining, 0);
        assert_eq!(details.daily_target, 0.0);
    }
}
