use anyhow::Result;
use contracts::dashboards::d401_employee_sales::dto::{
    EmployeeSalesRequest, EmployeeSalesResponse, EmployeeSalesRow,
};
use contracts::shared::sales_report::{EmployeeSalesRecord, NetSales};
use std::collections::HashSet;

use crate::shared::sales_report::{self, SalesReportSource};

/// Per-employee sales of an arbitrary period and product filter
pub async fn get_employee_sales(request: EmployeeSalesRequest) -> Result<EmployeeSalesResponse> {
    if request.date_to < request.date_from {
        anyhow::bail!("Validation failed: end date is before start date");
    }
    Ok(load(&request, sales_report::get_client()).await)
}

/// CSV export of the same listing
pub async fn export_csv(request: EmployeeSalesRequest) -> Result<String> {
    let response = get_employee_sales(request).await?;
    to_csv(&response.rows)
}

pub async fn load(request: &EmployeeSalesRequest, source: &dyn SalesReportSource) -> EmployeeSalesResponse {
    match source.fetch_employee_sales(&request.to_query()).await {
        Ok(records) => build_response(&records),
        Err(e) => {
            tracing::warn!("Employee sales unavailable: {}", e);
            EmployeeSalesResponse {
                notices: vec![format!("Employee sales could not be loaded: {}", e)],
                ..Default::default()
            }
        }
    }
}

pub fn build_response(records: &[EmployeeSalesRecord]) -> EmployeeSalesResponse {
    let rows: Vec<EmployeeSalesRow> = records
        .iter()
        .map(|r| {
            let net_quantity = r.net_quantity();
            let net_value = r.net_value();
            EmployeeSalesRow {
                employee_id: r.employee_id,
                employee_name: r.employee_name.clone(),
                store_code: r.store_code,
                store_name: r.store_name.clone(),
                net_quantity,
                net_value,
                average_ticket: (net_quantity > 0.0).then(|| net_value / net_quantity),
            }
        })
        .collect();

    let employee_count = rows
        .iter()
        .map(|r| r.employee_id)
        .collect::<HashSet<_>>()
        .len();

    EmployeeSalesResponse {
        employee_count,
        total_value: rows.iter().map(|r| r.net_value).sum(),
        total_quantity: rows.iter().map(|r| r.net_quantity).sum(),
        rows,
        notices: Vec::new(),
    }
}

pub fn to_csv(rows: &[EmployeeSalesRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record([
        "store_code",
        "store_name",
        "employee_id",
        "employee_name",
        "net_quantity",
        "net_value",
        "average_ticket",
    ])?;

    for row in rows {
        writer.write_record([
            row.store_code.to_string(),
            row.store_name.clone().unwrap_or_default(),
            row.employee_id.to_string(),
            row.employee_name.clone().unwrap_or_default(),
            format!("{:.2}", row.net_quantity),
            format!("{:.2}", row.net_value),
            row.average_ticket
                .map(|t| format!("{:.2}", t))
                .unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}
