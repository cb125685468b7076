//! Access to the external sales report ("actuals").

pub mod client;

use async_trait::async_trait;
use contracts::shared::sales_report::{EmployeeSalesRecord, SalesReportQuery, StoreSalesRecord};
use once_cell::sync::OnceCell;
use thiserror::Error;

pub use client::HttpSalesReportClient;

/// Errors of the sales report API
#[derive(Debug, Error)]
pub enum SalesReportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Sales report returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse sales report response: {0}")]
    Parse(String),

    #[error("Sales report client is not configured: {0}")]
    Configuration(String),
}

/// Source of realized sales figures
#[async_trait]
pub trait SalesReportSource: Send + Sync {
    /// Aggregate per store for the query's period and product filter
    async fn fetch_store_sales(
        &self,
        query: &SalesReportQuery,
    ) -> Result<Vec<StoreSalesRecord>, SalesReportError>;

    /// Aggregate per employee and store
    async fn fetch_employee_sales(
        &self,
        query: &SalesReportQuery,
    ) -> Result<Vec<EmployeeSalesRecord>, SalesReportError>;
}

static CLIENT: OnceCell<HttpSalesReportClient> = OnceCell::new();

pub fn initialize_client(client: HttpSalesReportClient) -> anyhow::Result<()> {
    CLIENT
        .set(client)
        .map_err(|_| anyhow::anyhow!("Sales report client already initialized"))
}

pub fn get_client() -> &'static HttpSalesReportClient {
    CLIENT
        .get()
        .expect("Sales report client has not been initialized")
}

/// Report rows of one refresh
#[derive(Debug, Default)]
pub struct Actuals {
    pub stores: Vec<StoreSalesRecord>,
    pub employees: Vec<EmployeeSalesRecord>,
    /// False when the store rows are a stand-in for a failed call
    pub stores_loaded: bool,
    pub notices: Vec<String>,
}

/// Fetch store and employee rows concurrently. A failed call yields an empty
/// list and a user-facing notice instead of an error.
pub async fn fetch_actuals(source: &dyn SalesReportSource, query: &SalesReportQuery) -> Actuals {
    let (stores, employees) = tokio::join!(
        source.fetch_store_sales(query),
        source.fetch_employee_sales(query)
    );

    let mut actuals = Actuals::default();
    match stores {
        Ok(rows) => {
            actuals.stores = rows;
            actuals.stores_loaded = true;
        }
        Err(e) => {
            tracing::warn!("Store sales unavailable: {}", e);
            actuals
                .notices
                .push(format!("Store sales could not be loaded: {}", e));
        }
    }
    match employees {
        Ok(rows) => actuals.employees = rows,
        Err(e) => {
            tracing::warn!("Employee sales unavailable: {}", e);
            actuals
                .notices
                .push(format!("Employee sales could not be loaded: {}", e));
        }
    }

    actuals
}


#[cfg(test)]
mod tests {
    use super::testing::StubSource;
    use super::*;
    use chrono::NaiveDate;

    fn query() -> SalesReportQuery {
        SalesReportQuery::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            Default::default(),
        )
    }

    #[tokio::test]
    async fn test_fetch_actuals_degrades_to_empty() {
        let source = StubSource {
            fail: true,
            ..Default::default()
        };
        let actuals = fetch_actuals(&source, &query()).await;
        assert!(actuals.stores.is_empty());
        assert!(actuals.employees.is_empty());
        assert!(!actuals.stores_loaded);
        assert_eq!(actuals.notices.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_actuals_passes_rows_through() {
        let source = StubSource {
            stores: vec![StoreSalesRecord {
                store_code: 1,
                gross_value: 10.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let actuals = fetch_actuals(&source, &query()).await;
        assert_eq!(actuals.stores.len(), 1);
        assert!(actuals.employees.is_empty());
        assert!(actuals.stores_loaded);
        assert!(actuals.notices.is_empty());
    }
}
