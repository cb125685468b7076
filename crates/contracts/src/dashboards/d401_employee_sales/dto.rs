use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::input::parse_list;
use crate::shared::sales_report::{ProductFilter, SalesReportQuery};

/// Ad-hoc query of the per-employee sales report. Filters are comma
/// separated lists as typed in the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSalesRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
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

impl EmployeeSalesRequest {
    pub fn to_query(&self) -> SalesReportQuery {
        SalesReportQuery::new(
            self.date_from,
            self.date_to,
            ProductFilter {
                supplier_ids: parse_list(&self.suppliers),
                brand_ids: parse_list(&self.brands),
                family_ids: parse_list(&self.families),
                group_ids: parse_list(&self.product_groups),
                product_codes: parse_list(&self.products),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSalesRow {
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub store_code: i64,
    pub store_name: Option<String>,
    pub net_quantity: f64,
    pub net_value: f64,
    /// Net value per unit; absent when no units were sold
    pub average_ticket: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmployeeSalesResponse {
    pub rows: Vec<EmployeeSalesRow>,
    pub employee_count: usize,
    pub total_value: f64,
    pub total_quantity: f64,
    pub notices: Vec<String>,
}
