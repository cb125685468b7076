pub mod d400_campaign_ranking;
pub mod d401_employee_sales;
