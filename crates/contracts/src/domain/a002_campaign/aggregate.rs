use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::campaign_status::CampaignStatus;
use crate::enums::goal_type::GoalType;
use crate::shared::input::parse_list;
use crate::shared::sales_report::{ProductFilter, SalesReportQuery};
use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique campaign identifier
    CampaignId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Time-boxed sales initiative. `base.description` is the campaign name,
/// `base.comment` its free text description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(flatten)]
    pub base: BaseAggregate<CampaignId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub goal_type: GoalType,
    pub status: CampaignStatus,
    /// Campaign only tracks sales, participants have no targets
    pub no_targets: bool,
    pub product_filter: ProductFilter,
}

impl Campaign {
    pub fn new_for_insert(
        name: String,
        description: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        goal_type: GoalType,
        no_targets: bool,
        product_filter: ProductFilter,
    ) -> Self {
        let id = CampaignId::new_v4();
        let code = format!("CMP-{}", &id.as_string()[..8]);
        let mut base = BaseAggregate::new(id, code, name);
        base.comment = description;

        Self {
            base,
            start_date,
            end_date,
            goal_type,
            status: CampaignStatus::Active,
            no_targets,
            product_filter,
        }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Report request covering the whole campaign
    pub fn report_query(&self) -> SalesReportQuery {
        SalesReportQuery::new(self.start_date, self.end_date, self.product_filter.clone())
    }

    pub fn set_status(&mut self, status: CampaignStatus) {
        self.status = status;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Campaign name must not be empty".into());
        }
        if self.end_date < self.start_date {
            return Err(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            ));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Campaign {
    type Id = CampaignId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "campaign"
    }

    fn element_name() -> &'static str {
        "Campaign"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Campaign creation form. Filter lists are typed by the manager as comma
/// separated text, e.g. `"21,20,25"`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampaignDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub goal_type: GoalType,
    #[serde(default)]
    pub no_targets: bool,
    #[serde(default)]
    pub suppliers: String,
    #[serde(default)]
    pub brands: String,
    #[serde(default)]
    pub families: String,
    #[serde(default)]
    pub product_groups: String,
    #[serde(default)]
    pub products: String,
}

impl CampaignDto {
    pub fn product_filter(&self) -> ProductFilter {
        ProductFilter {
            supplier_ids: parse_list(&self.suppliers),
            brand_ids: parse_list(&self.brands),
            family_ids: parse_list(&self.families),
            group_ids: parse_list(&self.product_groups),
            product_codes: parse_list(&self.products),
        }
    }

    /// Build the aggregate; fails when a date is missing
    pub fn into_campaign(self) -> Result<Campaign, String> {
        let start_date = self.start_date.ok_or("Start date is required")?;
        let end_date = self.end_date.ok_or("End date is required")?;
        let product_filter = self.product_filter();
        let description = self.description.filter(|d| !d.trim().is_empty());

        Ok(Campaign::new_for_insert(
            self.name,
            description,
            start_date,
            end_date,
            self.goal_type,
            self.no_targets,
            product_filter,
        ))
    }
}

/// Status change request, the only mutation of an existing campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStatusDto {
    pub status: CampaignStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CampaignDto {
        CampaignDto {
            name: "Summer vitamins".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 21),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 20),
            goal_type: GoalType::Value,
            suppliers: "1998".into(),
            product_groups: "21, 20,25".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_campaign_parses_filters() {
        let campaign = dto().into_campaign().unwrap();

        assert_eq!(campaign.name(), "Summer vitamins");
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert!(campaign.base.code.starts_with("CMP-"));
        assert_eq!(campaign.product_filter.supplier_ids, vec!["1998"]);
        assert_eq!(campaign.product_filter.group_ids, vec!["21", "20", "25"]);
        assert!(campaign.product_filter.brand_ids.is_empty());
        assert!(campaign.validate().is_ok());
    }

    #[test]
    fn test_missing_dates_are_rejected() {
        let mut form = dto();
        form.end_date = None;
        assert!(form.into_campaign().is_err());
    }

    #[test]
    fn test_validate_rejects_reversed_dates_and_blank_name() {
        let mut campaign = dto().into_campaign().unwrap();
        campaign.end_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(campaign.validate().is_err());

        let mut campaign = dto().into_campaign().unwrap();
        campaign.base.description = "  ".into();
        assert!(campaign.validate().is_err());
    }

    #[test]
    fn test_single_day_campaign_is_valid() {
        let mut form = dto();
        form.end_date = form.start_date;
        assert!(form.into_campaign().unwrap().validate().is_ok());
    }
}
