use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a002_campaign::aggregate::Campaign;
use crate::enums::goal_type::GoalType;

// ============================================================================
// Store ranking
// ============================================================================

/// One store's line in a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRankingEntry {
    pub participant_id: String,
    pub store_id: String,
    pub store_code: i64,
    pub store_number: Option<String>,
    pub store_name: Option<String>,
    pub region: Option<String>,
    pub group_id: String,
    /// 1-based position within the group
    pub rank: u32,
    /// Target for the campaign goal type
    pub target: f64,
    /// Net realized for the campaign goal type
    pub realized: f64,
    pub realized_quantity: f64,
    pub realized_value: f64,
    pub percent: f64,
    /// Distinct employees with sales rows for this store in the period
    pub employee_count: u32,
    pub average_per_employee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRankingGroup {
    pub group_id: String,
    pub total_realized: f64,
    pub total_target: f64,
    pub percent: f64,
    pub entries: Vec<StoreRankingEntry>,
}

// ============================================================================
// Employee ranking
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRankingEntry {
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub store_code: i64,
    pub store_name: Option<String>,
    pub group_id: String,
    pub rank: u32,
    pub realized: f64,
    pub net_quantity: f64,
    pub net_value: f64,
}

/// Employees have no targets, so a group only carries its total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRankingGroup {
    pub group_id: String,
    pub total_realized: f64,
    pub entries: Vec<EmployeeRankingEntry>,
}

// ============================================================================
// Campaign progress
// ============================================================================

/// Pace of a campaign compared with the share of its time already elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Target reached
    Complete,
    /// Realized share at least equal to the time share
    OnPace,
    /// Within 80% of the time share
    AtRisk,
    Behind,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::Complete => "ahead/complete",
            ProgressStatus::OnPace => "on pace",
            ProgressStatus::AtRisk => "at risk",
            ProgressStatus::Behind => "behind",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignProgress {
    pub realized: f64,
    pub target: f64,
    pub percent_realized: f64,
    pub percent_time: f64,
    pub elapsed_days: i64,
    pub total_days: i64,
    pub status: ProgressStatus,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CampaignStatistics {
    pub participant_count: usize,
    /// Participants with a positive realized figure
    pub stores_with_sales: usize,
    pub realized_quantity: f64,
    pub realized_value: f64,
    pub target_total: f64,
}

/// Query of the ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampaignRankingRequest {
    /// Reference day for the progress bar, defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRankingResponse {
    pub campaign: Campaign,
    pub goal_type: GoalType,
    pub stores: Vec<StoreRankingGroup>,
    pub employees: Vec<EmployeeRankingGroup>,
    /// Absent for campaigns without targets
    pub progress: Option<CampaignProgress>,
    pub statistics: CampaignStatistics,
    /// User-facing notices, e.g. the sales report being unavailable
    pub notices: Vec<String>,
}

/// Query of the campaign summary list
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampaignListRequest {
    #[serde(default)]
    pub include_inactive: bool,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Card of the campaign list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub campaign: Campaign,
    pub statistics: CampaignStatistics,
    pub progress: Option<CampaignProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSummaryResponse {
    pub campaigns: Vec<CampaignSummary>,
    pub notices: Vec<String>,
}
