use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique store identifier
    StoreId
);

/// Store number reserved for the head office; it never takes part in campaigns
pub const HEAD_OFFICE_NUMBER: &str = "00";

// ============================================================================
// Aggregate Root
// ============================================================================

/// A physical store. `base.code` holds the store number, `base.description`
/// the store name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(flatten)]
    pub base: BaseAggregate<StoreId>,
    pub region: Option<String>,
}

impl Store {
    pub fn new_for_insert(number: String, name: String, region: Option<String>) -> Self {
        Self {
            base: BaseAggregate::new(StoreId::new_v4(), number, name),
            region,
        }
    }

    pub fn number(&self) -> &str {
        &self.base.code
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Numeric value of the store number as used by the sales report
    /// (the report's branch code). Non-numeric numbers give 0.
    pub fn store_code(&self) -> i64 {
        self.base.code.trim().parse().unwrap_or(0)
    }

    pub fn is_head_office(&self) -> bool {
        self.base.code.trim() == HEAD_OFFICE_NUMBER
    }

    /// Case-insensitive match on name or number
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.base.description.to_lowercase().contains(&term)
            || self.base.code.to_lowercase().contains(&term)
    }

    pub fn update(&mut self, dto: &StoreDto) {
        self.base.code = dto.number.clone();
        self.base.description = dto.name.clone();
        self.region = dto.region.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Store number must not be empty".into());
        }
        if self.base.description.trim().is_empty() {
            return Err("Store name must not be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

/// Order stores by the numeric value of their number ("2" before "10")
pub fn sort_by_number(stores: &mut [Store]) {
    stores.sort_by_key(|s| s.store_code());
}

impl AggregateRoot for Store {
    type Id = StoreId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "store"
    }

    fn element_name() -> &'static str {
        "Store"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreDto {
    pub id: Option<String>,
    pub number: String,
    pub name: String,
    pub region: Option<String>,
}

impl StoreDto {
    pub fn parsed_id(&self) -> Option<StoreId> {
        self.id.as_deref().and_then(|s| StoreId::from_string(s).ok())
    }
}
