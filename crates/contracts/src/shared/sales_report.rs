//! Wire records of the external sales report API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::{join_list, lenient_f64, lenient_i64};

// ============================================================================
// Request
// ============================================================================

/// Product scope of a campaign. Every list is optional; an empty list does
/// not restrict the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductFilter {
    #[serde(default)]
    pub supplier_ids: Vec<String>,
    #[serde(default)]
    pub brand_ids: Vec<String>,
    #[serde(default)]
    pub family_ids: Vec<String>,
    #[serde(default)]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub product_codes: Vec<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.supplier_ids.is_empty()
            && self.brand_ids.is_empty()
            && self.family_ids.is_empty()
            && self.group_ids.is_empty()
            && self.product_codes.is_empty()
    }
}

/// Parameters of one report request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReportQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default)]
    pub filter: ProductFilter,
}

impl SalesReportQuery {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate, filter: ProductFilter) -> Self {
        Self {
            date_from,
            date_to,
            filter,
        }
    }

    /// Query string pairs as the report API expects them.
    /// Empty filter lists are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("dataInicio", self.date_from.format("%Y-%m-%d").to_string()),
            ("dataFim", self.date_to.format("%Y-%m-%d").to_string()),
        ];
        let lists = [
            ("filtroFornecedores", &self.filter.supplier_ids),
            ("filtroMarcas", &self.filter.brand_ids),
            ("filtroFamilias", &self.filter.family_ids),
            ("filtroGrupos", &self.filter.group_ids),
            ("filtroProdutos", &self.filter.product_codes),
        ];
        for (key, items) in lists {
            if let Some(joined) = join_list(items) {
                pairs.push((key, joined));
            }
        }
        pairs
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Per-store aggregate for the requested period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoreSalesRecord {
    #[serde(rename = "CDFIL", alias = "store_code", deserialize_with = "lenient_i64")]
    pub store_code: i64,
    #[serde(rename = "TOTAL_QUANTIDADE", alias = "gross_quantity", default, deserialize_with = "lenient_f64")]
    pub gross_quantity: f64,
    #[serde(rename = "TOTAL_QUANTIDADE_DEVOLVIDA", alias = "returned_quantity", default, deserialize_with = "lenient_f64")]
    pub returned_quantity: f64,
    #[serde(rename = "TOTAL_VALOR", alias = "gross_value", default, deserialize_with = "lenient_f64")]
    pub gross_value: f64,
    #[serde(rename = "TOTAL_VALOR_DEVOLVIDO", alias = "returned_value", default, deserialize_with = "lenient_f64")]
    pub returned_value: f64,
}

/// Per-employee aggregate: one row per employee per store for the period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmployeeSalesRecord {
    #[serde(rename = "CDFUN", alias = "employee_id", deserialize_with = "lenient_i64")]
    pub employee_id: i64,
    #[serde(rename = "NOMEFUN", alias = "employee_name", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "CDFIL", alias = "store_code", deserialize_with = "lenient_i64")]
    pub store_code: i64,
    #[serde(rename = "NOMEFIL", alias = "store_name", default)]
    pub store_name: Option<String>,
    #[serde(rename = "TOTAL_QUANTIDADE", alias = "gross_quantity", default, deserialize_with = "lenient_f64")]
    pub gross_quantity: f64,
    #[serde(rename = "TOTAL_QUANTIDADE_DEVOLVIDA", alias = "returned_quantity", default, deserialize_with = "lenient_f64")]
    pub returned_quantity: f64,
    #[serde(rename = "TOTAL_VALOR", alias = "gross_value", default, deserialize_with = "lenient_f64")]
    pub gross_value: f64,
    #[serde(rename = "TOTAL_VALOR_DEVOLVIDO", alias = "returned_value", default, deserialize_with = "lenient_f64")]
    pub returned_value: f64,
}

/// Gross minus returns. Returns above gross give a negative figure, which is
/// passed through as is.
pub trait NetSales {
    fn gross_quantity(&self) -> f64;
    fn returned_quantity(&self) -> f64;
    fn gross_value(&self) -> f64;
    fn returned_value(&self) -> f64;

    fn net_quantity(&self) -> f64 {
        self.gross_quantity() - self.returned_quantity()
    }

    fn net_value(&self) -> f64 {
        self.gross_value() - self.returned_value()
    }
}

macro_rules! impl_net_sales {
    ($t:ty) => {
        impl NetSales for $t {
            fn gross_quantity(&self) -> f64 {
                self.gross_quantity
            }
            fn returned_quantity(&self) -> f64 {
                self.returned_quantity
            }
            fn gross_value(&self) -> f64 {
                self.gross_value
            }
            fn returned_value(&self) -> f64 {
                self.returned_value
            }
        }
    };
}

impl_net_sales!(StoreSalesRecord);
impl_net_sales!(EmployeeSalesRecord);
