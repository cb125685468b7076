use serde::{Deserialize, Serialize};

use crate::domain::a001_store::aggregate::StoreId;
use crate::domain::a002_campaign::aggregate::CampaignId;
use crate::enums::goal_type::GoalType;
use crate::shared::input::lenient_target;
use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique participant identifier
    ParticipantId
);

/// Group used when a participant row carries no group
pub const DEFAULT_GROUP_ID: &str = "1";

/// `part / whole * 100`, defined as 0 when `whole` is not positive
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// A store's enrollment in a campaign with its targets and the realized
/// figures cached by the last ranking refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub campaign_id: CampaignId,
    pub store_id: StoreId,
    /// Branch code used by the sales report
    pub store_code: i64,
    pub group_id: String,
    pub target_quantity: f64,
    pub target_value: f64,
    pub realized_quantity: f64,
    pub realized_value: f64,
    pub percent_of_target: f64,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Participant {
    pub fn new(
        campaign_id: CampaignId,
        store_id: StoreId,
        store_code: i64,
        group_id: String,
        target_quantity: f64,
        target_value: f64,
    ) -> Self {
        Self {
            id: ParticipantId::new_v4(),
            campaign_id,
            store_id,
            store_code,
            group_id: normalize_group(&group_id),
            target_quantity: target_quantity.max(0.0),
            target_value: target_value.max(0.0),
            realized_quantity: 0.0,
            realized_value: 0.0,
            percent_of_target: 0.0,
            updated_at: None,
        }
    }

    pub fn target_for(&self, goal_type: GoalType) -> f64 {
        goal_type.select(self.target_quantity, self.target_value)
    }

    pub fn realized_for(&self, goal_type: GoalType) -> f64 {
        goal_type.select(self.realized_quantity, self.realized_value)
    }

    /// Store the net figures of a refresh and recompute the percent
    pub fn apply_realized(&mut self, net_quantity: f64, net_value: f64, goal_type: GoalType) {
        self.realized_quantity = net_quantity;
        self.realized_value = net_value;
        self.percent_of_target =
            percent_of(self.realized_for(goal_type), self.target_for(goal_type));
        self.updated_at = Some(chrono::Utc::now());
    }

    pub fn update(&mut self, dto: &ParticipantDto) {
        if let Some(code) = dto.store_code {
            self.store_code = code;
        }
        self.group_id = normalize_group(&dto.group_id);
        self.target_quantity = dto.target_quantity;
        self.target_value = dto.target_value;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.target_quantity < 0.0 || self.target_value < 0.0 {
            return Err("Targets must not be negative".into());
        }
        Ok(())
    }
}

fn normalize_group(group_id: &str) -> String {
    let trimmed = group_id.trim();
    if trimmed.is_empty() {
        DEFAULT_GROUP_ID.to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Participant form. Targets accept numbers or text; anything malformed or
/// negative becomes 0.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParticipantDto {
    pub id: Option<String>,
    pub store_id: String,
    /// Defaults to the store's number when omitted
    #[serde(default)]
    pub store_code: Option<i64>,
    #[serde(default)]
    pub group_id: String,
    #[serde(default, deserialize_with = "lenient_target")]
    pub target_quantity: f64,
    #[serde(default, deserialize_with = "lenient_target")]
    pub target_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_zero_target() {
        assert_eq!(percent_of(50.0, 0.0), 0.0);
        assert_eq!(percent_of(0.0, 0.0), 0.0);
        assert_eq!(percent_of(40.0, 50.0), 80.0);
    }

    #[test]
    fn test_apply_realized_uses_goal_type() {
        let mut p = Participant::new(
            CampaignId::new_v4(),
            StoreId::new_v4(),
            12,
            " ".into(),
            100.0,
            2000.0,
        );
        assert_eq!(p.group_id, DEFAULT_GROUP_ID);

        p.apply_realized(50.0, 3000.0, GoalType::Value);
        assert_eq!(p.percent_of_target, 150.0);

        p.apply_realized(50.0, 3000.0, GoalType::Quantity);
        assert_eq!(p.percent_of_target, 50.0);
    }

    #[test]
    fn test_dto_coerces_malformed_targets() {
        let dto: ParticipantDto = serde_json::from_str(
            r#"{"store_id": "x", "group_id": "2", "target_quantity": "abc", "target_value": "250,5"}"#,
        )
        .unwrap();
        assert_eq!(dto.target_quantity, 0.0);
        assert_eq!(dto.target_value, 250.5);
    }
}
