use async_trait::async_trait;
use contracts::shared::sales_report::{EmployeeSalesRecord, SalesReportQuery, StoreSalesRecord};
use serde::de::DeserializeOwned;

use super::{SalesReportError, SalesReportSource};
use crate::shared::config::SalesReportConfig;

const STORE_SALES_PATH: &str = "/sales/stores";
const EMPLOYEE_SALES_PATH: &str = "/sales/employees";

/// HTTP client for the external sales report API
pub struct HttpSalesReportClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpSalesReportClient {
    pub fn from_config(config: &SalesReportConfig) -> Result<Self, SalesReportError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SalesReportError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config
                .api_token
                .clone()
                .filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &SalesReportQuery,
    ) -> Result<Vec<T>, SalesReportError> {
        let url = self.url(path);
        let params = query.to_query_pairs();
        tracing::debug!("GET {} {:?}", url, params);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&params);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Sales report connection error: {}", e);
            SalesReportError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Sales report request failed with {}: {}", status, body);
            return Err(SalesReportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SalesReportError::Network(e.to_string()))?;
        let rows = parse_rows::<T>(&body)?;
        tracing::info!("Sales report {} returned {} rows", path, rows.len());
        Ok(rows)
    }
}

/// Parse a report body. The API answers with a bare array, or with `null` /
/// an empty body when the period has no sales.
pub fn parse_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, SalesReportError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<T>>(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(200).collect();
        tracing::error!("Failed to parse sales report response: {}. Body: {}", e, preview);
        SalesReportError::Parse(e.to_string())
    })
}

#[async_trait]
impl SalesReportSource for HttpSalesReportClient {
    async fn fetch_store_sales(
        &self,
        query: &SalesReportQuery,
    ) -> Result<Vec<StoreSalesRecord>, SalesReportError> {
        self.get_rows(STORE_SALES_PATH, query).await
    }

    async fn fetch_employee_sales(
        &self,
        query: &SalesReportQuery,
    ) -> Result<Vec<EmployeeSalesRecord>, SalesReportError> {
        self.get_rows(EMPLOYEE_SALES_PATH, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::sales_report::NetSales;

    #[test]
    fn test_parse_employee_rows() {
        let body = r#"[
            {"CDFUN": 501, "NOMEFUN": "Ana", "CDFIL": 12, "NOMEFIL": "Centro",
             "TOTAL_QUANTIDADE": 10, "TOTAL_VALOR": 500.0, "TOTAL_VALOR_DEVOLVIDO": 500.0}
        ]"#;
        let rows: Vec<EmployeeSalesRecord> = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name.as_deref(), Some("Ana"));
        assert_eq!(rows[0].net_value(), 0.0);
    }

    #[test]
    fn test_parse_empty_bodies() {
        assert!(parse_rows::<StoreSalesRecord>("").unwrap().is_empty());
        assert!(parse_rows::<StoreSalesRecord>(" null ").unwrap().is_empty());
        assert!(parse_rows::<StoreSalesRecord>("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error() {
        let result = parse_rows::<StoreSalesRecord>(r#"{"error": "bad filter"}"#);
        assert!(matches!(result, Err(SalesReportError::Parse(_))));
    }

    #[test]
    fn test_url_and_token() {
        let client = HttpSalesReportClient::from_config(&SalesReportConfig {
            base_url: "https://reports.example.com/api/".into(),
            timeout_secs: 5,
            api_token: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(client.url(STORE_SALES_PATH), "https://reports.example.com/api/sales/stores");
        assert!(client.api_token.is_none());
    }
}
