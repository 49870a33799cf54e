use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

///
/// EventState
/// Ephemeral, in-process page counters.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

impl EventState {
    const fn new() -> Self {
        Self {
            ops: EventOps::new(),
            entities: BTreeMap::new(),
        }
    }

    /// Counter slot for one entity path.
    pub(crate) fn entity_mut(&mut self, entity_path: &str) -> &mut EntityCounters {
        self.entities.entry(entity_path.to_string()).or_default()
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Requests
    pub page_calls: u64,
    pub previous_page_calls: u64,

    // Rows
    pub rows_fetched: u64,
    pub rows_returned: u64,
    pub pages_with_more: u64,

    // Request recovery
    pub cursor_fallbacks: u64,
    pub sort_fallbacks: u64,
    pub limit_clamps: u64,

    // Source failures
    pub source_timeouts: u64,
    pub source_cancellations: u64,
    pub source_failures: u64,
}

impl EventOps {
    const fn new() -> Self {
        Self {
            page_calls: 0,
            previous_page_calls: 0,
            rows_fetched: 0,
            rows_returned: 0,
            pages_with_more: 0,
            cursor_fallbacks: 0,
            sort_fallbacks: 0,
            limit_clamps: 0,
            source_timeouts: 0,
            source_cancellations: 0,
            source_failures: 0,
        }
    }
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntityCounters {
    pub page_calls: u64,
    pub rows_fetched: u64,
    pub rows_returned: u64,
    pub cursor_fallbacks: u64,
    pub sort_fallbacks: u64,
    pub limit_clamps: u64,
    pub source_failures: u64,
}

static EVENT_STATE: Mutex<EventState> = Mutex::new(EventState::new());

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    let guard = EVENT_STATE.lock().unwrap_or_else(PoisonError::into_inner);

    f(&guard)
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    let mut guard = EVENT_STATE.lock().unwrap_or_else(PoisonError::into_inner);

    f(&mut guard)
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::new());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Process-wide counters since the last reset.
    pub counters: EventState,
    /// Per-entity counters with averages.
    pub entity_counters: Vec<EntitySummary>,
}

impl EventReport {
    /// Summary row for one entity path.
    #[must_use]
    pub fn entity(&self, path: &str) -> Option<&EntitySummary> {
        self.entity_counters.iter().find(|summary| summary.path == path)
    }
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntitySummary {
    pub path: String,
    pub page_calls: u64,
    pub rows_fetched: u64,
    pub rows_returned: u64,
    pub avg_rows_per_page: f64,
    pub cursor_fallbacks: u64,
    pub sort_fallbacks: u64,
    pub limit_clamps: u64,
    pub source_failures: u64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut entity_counters: Vec<EntitySummary> = snap
        .entities
        .iter()
        .map(|(path, ops)| EntitySummary {
            path: path.clone(),
            page_calls: ops.page_calls,
            rows_fetched: ops.rows_fetched,
            rows_returned: ops.rows_returned,
            avg_rows_per_page: if ops.page_calls > 0 {
                ops.rows_returned as f64 / ops.page_calls as f64
            } else {
                0.0
            },
            cursor_fallbacks: ops.cursor_fallbacks,
            sort_fallbacks: ops.sort_fallbacks,
            limit_clamps: ops.limit_clamps,
            source_failures: ops.source_failures,
        })
        .collect();

    // Busiest entities first, path as a stable tie-break.
    entity_counters.sort_by(|a, b| {
        b.page_calls
            .cmp(&a.page_calls)
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: snap,
        entity_counters,
    }
}
