pub mod input;
pub mod sales_report;
