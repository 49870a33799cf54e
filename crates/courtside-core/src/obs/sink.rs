//! Metrics sink boundary.
//!
//! Paginator logic MUST NOT touch `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.

use crate::{direction::PageDirection, error::ErrorClass, obs::metrics};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricsEvent {
    PageStart {
        entity_path: &'static str,
        direction: PageDirection,
    },
    PageFinish {
        entity_path: &'static str,
        rows_fetched: u64,
        rows_returned: u64,
        has_more: bool,
    },
    CursorFallback {
        entity_path: &'static str,
    },
    SortFallback {
        entity_path: &'static str,
    },
    LimitClamped {
        entity_path: &'static str,
    },
    SourceFailure {
        entity_path: &'static str,
        class: ErrorClass,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default process-wide sink that writes into the global counter state.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::PageStart {
                entity_path,
                direction,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.page_calls = m.ops.page_calls.saturating_add(1);
                    if direction.is_previous() {
                        m.ops.previous_page_calls = m.ops.previous_page_calls.saturating_add(1);
                    }

                    let entry = m.entity_mut(entity_path);
                    entry.page_calls = entry.page_calls.saturating_add(1);
                });
            }

            MetricsEvent::PageFinish {
                entity_path,
                rows_fetched,
                rows_returned,
                has_more,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_fetched = m.ops.rows_fetched.saturating_add(rows_fetched);
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                    if has_more {
                        m.ops.pages_with_more = m.ops.pages_with_more.saturating_add(1);
                    }

                    let entry = m.entity_mut(entity_path);
                    entry.rows_fetched = entry.rows_fetched.saturating_add(rows_fetched);
                    entry.rows_returned = entry.rows_returned.saturating_add(rows_returned);
                });
            }

            MetricsEvent::CursorFallback { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.cursor_fallbacks = m.ops.cursor_fallbacks.saturating_add(1);
                    let entry = m.entity_mut(entity_path);
                    entry.cursor_fallbacks = entry.cursor_fallbacks.saturating_add(1);
                });
            }

            MetricsEvent::SortFallback { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.sort_fallbacks = m.ops.sort_fallbacks.saturating_add(1);
                    let entry = m.entity_mut(entity_path);
                    entry.sort_fallbacks = entry.sort_fallbacks.saturating_add(1);
                });
            }

            MetricsEvent::LimitClamped { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.limit_clamps = m.ops.limit_clamps.saturating_add(1);
                    let entry = m.entity_mut(entity_path);
                    entry.limit_clamps = entry.limit_clamps.saturating_add(1);
                });
            }

            MetricsEvent::SourceFailure { entity_path, class } => {
                metrics::with_state_mut(|m| {
                    match class {
                        ErrorClass::Timeout => {
                            m.ops.source_timeouts = m.ops.source_timeouts.saturating_add(1);
                        }
                        ErrorClass::Cancelled => {
                            m.ops.source_cancellations =
                                m.ops.source_cancellations.saturating_add(1);
                        }
                        ErrorClass::Unavailable
                        | ErrorClass::InvariantViolation
                        | ErrorClass::Internal => {
                            m.ops.source_failures = m.ops.source_failures.saturating_add(1);
                        }
                    }

                    let entry = m.entity_mut(entity_path);
                    entry.source_failures = entry.source_failures.saturating_add(1);
                });
            }
        }
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

///
/// TESTS
///
