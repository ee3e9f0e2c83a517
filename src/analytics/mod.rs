//! The analytics aggregation engine.
//!
//! Pure, synchronous transformations over data already materialized in
//! memory: no I/O, no locks, no hidden clock. Each submodule owns one
//! stage — amount normalization, lead-time arithmetic, time-bucket
//! series, scalar KPIs, and the dynamic-field distribution.

pub mod fields;
pub mod kpi;
pub mod lead_time;
pub mod money;
pub mod series;

pub use fields::{FieldAnswer, FieldDistribution};
pub use lead_time::LeadWindow;
pub use series::{CountSeries, RevenueSeries};
