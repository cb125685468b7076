pub mod campaign_status;
pub mod goal_type;
