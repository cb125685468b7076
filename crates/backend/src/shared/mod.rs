pub mod config;
pub mod data;
pub mod request_log;
pub mod sales_report;
