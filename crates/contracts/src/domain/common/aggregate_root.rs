use super::EntityMetadata;

/// Aggregate root: identity, business code, lifecycle metadata and the
/// static naming used for tables and messages.
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    /// Business code (store number, "CMP-..." for campaigns)
    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    /// Aggregate index in the system, e.g. "a002"
    fn aggregate_index() -> &'static str;

    /// Collection name, e.g. "campaign"
    fn collection_name() -> &'static str;

    /// Human readable name used in log messages
    fn element_name() -> &'static str;

    /// Full name used as table name, e.g. "a002_campaign"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
