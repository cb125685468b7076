pub mod a001_store;
pub mod a002_campaign;
pub mod a003_campaign_participant;
pub mod a004_goal_period;
