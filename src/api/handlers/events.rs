//! Event analytics handlers: listing, per-event views, bulk preload.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BulkEventsRequest, EventDetailsDto, EventSummaryDto, FieldDistributionDto,
    RegistrationViewDto, RevenueViewDto,
};
use crate::app_state::AppState;
use crate::auth;
use crate::domain::OrgId;
use crate::error::{AnalyticsError, ErrorResponse};

/// Header carrying the encrypted org-resolution token.
const ORG_TOKEN_HEADER: &str = "x-org-token";

/// Maximum ids accepted by the bulk preload endpoint.
const BULK_MAX_EVENTS: usize = 5;

/// Resolves the request's org scope from the token header. Failures
/// collapse to the sentinel scope, which sees no data.
fn org_scope(headers: &HeaderMap) -> OrgId {
    let token = headers
        .get(ORG_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    auth::resolve_org(token)
}

/// `GET /events` — List the organization's events.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns summaries of every event in the requesting organization's scope, name-ordered. An unresolvable org token yields an empty list.",
    responses(
        (status = 200, description = "Event summaries", body = Vec<EventSummaryDto>),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let org_id = org_scope(&headers);
    let summaries: Vec<EventSummaryDto> = state
        .analytics
        .list_events(org_id)
        .await
        .into_iter()
        .map(Into::into)
        .collect();
    Json(summaries)
}

/// `GET /events/{id}/registrations` — Registration analytics for one
/// event.
///
/// # Errors
///
/// Returns [`AnalyticsError::EventNotFound`] when the id does not
/// resolve within the org scope.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/registrations",
    tag = "Events",
    summary = "Registration analytics",
    description = "Cumulative registration series plus count, average-per-day, and target KPIs. Zero-valued for events without registrations.",
    params(
        ("id" = String, Path, description = "Opaque event id"),
    ),
    responses(
        (status = 200, description = "Registration view", body = RegistrationViewDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_registrations(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AnalyticsError> {
    let org_id = org_scope(&headers);
    let view = state.analytics.event_registrations(org_id, &id).await?;
    Ok(Json(RegistrationViewDto::from(view)))
}

/// `GET /events/{id}/revenue` — Revenue analytics for one event.
///
/// # Errors
///
/// Returns [`AnalyticsError::EventNotFound`] when the id does not
/// resolve within the org scope.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/revenue",
    tag = "Events",
    summary = "Revenue analytics",
    description = "Cumulative signed revenue series plus ticket-price and total-revenue KPIs. Zero-valued for events without transactions.",
    params(
        ("id" = String, Path, description = "Opaque event id"),
    ),
    responses(
        (status = 200, description = "Revenue view", body = RevenueViewDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_revenue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AnalyticsError> {
    let org_id = org_scope(&headers);
    let view = state.analytics.event_revenue(org_id, &id).await?;
    Ok(Json(RevenueViewDto::from(view)))
}

/// `GET /events/{id}/fields` — Dynamic-field answer distribution.
///
/// # Errors
///
/// Returns [`AnalyticsError::EventNotFound`] when the id does not
/// resolve within the org scope.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/fields",
    tag = "Events",
    summary = "Dynamic-field distribution",
    description = "Per-field answer value frequencies. Every field is listed in `labels`; only chartable fields (more than one and at most twenty distinct values) appear in `distribution`.",
    params(
        ("id" = String, Path, description = "Opaque event id"),
    ),
    responses(
        (status = 200, description = "Field distribution", body = FieldDistributionDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_fields(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AnalyticsError> {
    let org_id = org_scope(&headers);
    let dist = state.analytics.field_distribution(org_id, &id).await?;
    Ok(Json(FieldDistributionDto::from(dist)))
}

/// `POST /events/bulk` — Preload combined details for up to five
/// events.
///
/// Ids that do not resolve are silently skipped so a stale sidebar
/// selection cannot break the whole preload.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidRequest`] when the id list is empty
/// or longer than five.
#[utoipa::path(
    post,
    path = "/api/v1/events/bulk",
    tag = "Events",
    summary = "Bulk event details",
    description = "Returns combined registration and revenue views for each id that resolves, skipping the rest.",
    request_body = BulkEventsRequest,
    responses(
        (status = 200, description = "Details for the resolvable ids", body = Vec<EventDetailsDto>),
        (status = 400, description = "Id list size out of range", body = ErrorResponse),
    )
)]
pub async fn bulk_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BulkEventsRequest>,
) -> Result<impl IntoResponse, AnalyticsError> {
    if request.event_ids.is_empty() || request.event_ids.len() > BULK_MAX_EVENTS {
        return Err(AnalyticsError::InvalidRequest(format!(
            "event_ids must contain between 1 and {BULK_MAX_EVENTS} ids"
        )));
    }

    let org_id = org_scope(&headers);
    let mut details = Vec::with_capacity(request.event_ids.len());
    for id in &request.event_ids {
        match state.analytics.event_details(org_id, id).await {
            Ok(detail) => details.push(EventDetailsDto::from(detail)),
            Err(AnalyticsError::EventNotFound(_)) => {}
            Err(other) => return Err(other),
        }
    }

    Ok(Json(details))
}

/// Event analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/bulk", post(bulk_events))
        .route("/events/{id}/registrations", get(event_registrations))
        .route("/events/{id}/revenue", get(event_revenue))
        .route("/events/{id}/fields", get(event_fields))
}
