//! Observability: page-level telemetry counters and sink abstractions.
//!
//! Paginator code records through `MetricsSink` only; the global counter
//! state is reachable from here and nowhere else.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EntitySummary, EventOps, EventReport, EventState};
pub use sink::{GlobalMetricsSink, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
