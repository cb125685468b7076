use serde::{Deserialize, Serialize};

/// Lifecycle state of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Inactive,
    Closed,
}

impl CampaignStatus {
    pub fn code(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Inactive => "inactive",
            CampaignStatus::Closed => "closed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Inactive => "Inactive",
            CampaignStatus::Closed => "Closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "active" | "ativa" => Some(CampaignStatus::Active),
            "inactive" | "inativa" => Some(CampaignStatus::Inactive),
            "closed" | "encerrada" => Some(CampaignStatus::Closed),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CampaignStatus::Active)
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
