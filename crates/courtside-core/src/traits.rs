use crate::sort::SortTable;

///
/// EntityKind
///
/// Contract between a domain entity and the keyset engine.
/// The engine only sees the entity's id and the attributes declared in its
/// sort table; everything else stays opaque.
///

pub trait EntityKind: Clone + Send + Sync + 'static {
    /// Stable entity path used in logs and metrics.
    const PATH: &'static str;

    /// Declarative sort-field table. The first field is the default.
    const SORT: SortTable<Self>;

    /// Unique identifier; ids are totally ordered by byte-wise string order.
    fn id(&self) -> &str;
}
