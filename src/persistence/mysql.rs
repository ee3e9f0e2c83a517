//! MySQL implementation of the record source.

use chrono::NaiveDateTime;
use sqlx::MySqlPool;

use super::RecordSource;
use super::models::{EventRow, FieldRow, RegistrationRow, TransactionRow};
use crate::domain::DatasetSnapshot;
use crate::error::AnalyticsError;

/// Record source backed by the platform's MySQL mirror via
/// `sqlx::MySqlPool`.
///
/// All upstream filters live in the queries here: only `'Ok'`
/// registrations are counted, only `'both'`/`'organization_only'`
/// transactions are revenue-relevant, and transaction rows missing an
/// amount, credit flag, or timestamp are excluded outright.
#[derive(Debug, Clone)]
pub struct MySqlRecordSource {
    pool: MySqlPool,
}

impl MySqlRecordSource {
    /// Creates a record source over the given connection pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn load_events(&self) -> Result<Vec<EventRow>, AnalyticsError> {
        let rows = sqlx::query_as::<_, (i64, i64, String, NaiveDateTime, NaiveDateTime, Option<i64>)>(
            "SELECT id, organization_id, name, created_at, start_date, target_registrations \
             FROM events",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AnalyticsError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, organization_id, name, created_at, start_date, target_registrations)| {
                    EventRow {
                        id,
                        organization_id,
                        name,
                        created_at,
                        start_date,
                        target_registrations,
                    }
                },
            )
            .collect())
    }

    async fn load_registrations(&self) -> Result<Vec<RegistrationRow>, AnalyticsError> {
        let rows = sqlx::query_as::<_, (i64, i64, NaiveDateTime, Option<String>)>(
            "SELECT id, event_id, created_at, dynamic_fields_serial \
             FROM registrations \
             WHERE status = 'Ok'",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AnalyticsError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, event_id, created_at, dynamic_fields_serial)| RegistrationRow {
                id,
                event_id,
                created_at,
                dynamic_fields_serial,
            })
            .collect())
    }

    async fn load_transactions(&self) -> Result<Vec<TransactionRow>, AnalyticsError> {
        let rows = sqlx::query_as::<_, (i64, i64, String, bool, NaiveDateTime)>(
            "SELECT t.registration_id, r.event_id, t.amount, t.credit, t.transaction_date \
             FROM transactions t \
             INNER JOIN registrations r ON r.id = t.registration_id \
             WHERE r.status = 'Ok' \
               AND t.counts_for IN ('both', 'organization_only') \
               AND t.amount IS NOT NULL \
               AND t.credit IS NOT NULL \
               AND t.transaction_date IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AnalyticsError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(registration_id, event_id, amount, credit, transaction_date)| TransactionRow {
                    registration_id,
                    event_id,
                    amount,
                    credit,
                    transaction_date,
                },
            )
            .collect())
    }

    async fn load_fields(&self) -> Result<Vec<FieldRow>, AnalyticsError> {
        let rows = sqlx::query_as::<_, (i64, i64, String)>(
            "SELECT id, event_id, label FROM event_fields",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AnalyticsError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, event_id, label)| FieldRow {
                id,
                event_id,
                label,
            })
            .collect())
    }
}

impl RecordSource for MySqlRecordSource {
    async fn load_snapshot(&self) -> Result<DatasetSnapshot, AnalyticsError> {
        let events = self.load_events().await?;
        let registrations = self.load_registrations().await?;
        let transactions = self.load_transactions().await?;
        let fields = self.load_fields().await?;

        tracing::debug!(
            events = events.len(),
            registrations = registrations.len(),
            transactions = transactions.len(),
            fields = fields.len(),
            "dataset loaded from mirror"
        );

        Ok(DatasetSnapshot::new(
            events.into_iter().map(Into::into).collect(),
            registrations.into_iter().map(Into::into).collect(),
            transactions.into_iter().map(Into::into).collect(),
            fields.into_iter().map(Into::into).collect(),
        ))
    }
}
