//! Report rendering for single and batch estimates.

use crate::domain::model::{BatchReport, EstimateRequest, EstimateResult};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::formatting::{format_breakdown, format_currency};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DisplayValues {
    pub admin_savings: String,
    pub product_savings: String,
    pub total_savings: String,
}

impl DisplayValues {
    pub fn new(result: &EstimateResult, symbol: &str) -> Self {
        Self {
            admin_savings: format_currency(result.admin_savings, symbol),
            product_savings: format_currency(result.product_savings, symbol),
            total_savings: format_currency(result.total_savings, symbol),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EstimateOutput<'a> {
    pub request: &'a EstimateRequest,
    pub result: EstimateResult,
    pub display: DisplayValues,
}

pub fn render_text(request: &EstimateRequest, result: &EstimateResult, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Estimated annual savings\n");
    output.push_str(&format!(
        "  Employees: {}, orders per year: {}, products: {}\n",
        request.employee_count,
        request.annual_frequency,
        request.selected_products.join(", ")
    ));
    output.push_str(&format_breakdown(result, symbol));
    output
}

pub fn render_json(
    request: &EstimateRequest,
    result: &EstimateResult,
    symbol: &str,
) -> Result<String> {
    let output = EstimateOutput {
        request,
        result: *result,
        display: DisplayValues::new(result, symbol),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    row: usize,
    employee_count: u32,
    hourly_rate: Decimal,
    monthly_hours: Decimal,
    annual_frequency: u32,
    products: String,
    admin_savings: Decimal,
    product_savings: Decimal,
    total_savings: Decimal,
    total_display: &'a str,
}

pub fn render_csv(report: &BatchReport, symbol: &str) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in &report.rows {
        let total_display = format_currency(row.result.total_savings, symbol);
        writer.serialize(CsvRow {
            row: row.row,
            employee_count: row.request.employee_count,
            hourly_rate: row.request.hourly_rate,
            monthly_hours: row.request.monthly_hours,
            annual_frequency: row.request.annual_frequency,
            products: row.request.selected_products.join(";"),
            admin_savings: row.result.admin_savings,
            product_savings: row.result.product_savings,
            total_savings: row.result.total_savings,
            total_display: &total_display,
        })?;
    }

    writer.into_inner().map_err(|e| EstimatorError::ReportError {
        message: format!("failed to flush CSV report: {}", e),
    })
}

pub fn render_batch_json(report: &BatchReport) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

pub fn render_batch_summary(report: &BatchReport, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Estimated {} request(s), skipped {}\n",
        report.rows.len(),
        report.skipped.len()
    ));
    output.push_str(&format_breakdown(&report.totals, symbol));
    for skipped in &report.skipped {
        output.push_str(&format!("  row {} skipped: {}\n", skipped.row, skipped.reason));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EstimateRow, SkippedRow};
    use rust_decimal_macros::dec;

    fn request() -> EstimateRequest {
        EstimateRequest {
            employee_count: 10,
            hourly_rate: dec!(20),
            monthly_hours: dec!(5),
            annual_frequency: 4,
            selected_products: vec!["tshirt".to_string(), "hoodie".to_string()],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&request(), &EstimateResult::new(dec!(840), dec!(760)), "$");
        assert!(text.contains("products: tshirt, hoodie"));
        assert!(text.contains("$1,600"));
    }

    #[test]
    fn test_render_json_includes_display_values() {
        let json = render_json(&request(), &EstimateResult::new(dec!(840), dec!(760)), "$").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["display"]["total_savings"], "$1,600");
        assert_eq!(value["request"]["employee_count"], 10);
        assert_eq!(value["result"]["total_savings"], "1600");
    }

    #[test]
    fn test_render_csv() {
        let report = BatchReport::new(
            vec![EstimateRow {
                row: 1,
                request: request(),
                result: EstimateResult::new(dec!(840), dec!(760)),
            }],
            vec![SkippedRow {
                row: 2,
                reason: "bad".to_string(),
            }],
        );
        let csv = String::from_utf8(render_csv(&report, "$").unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("row,employee_count,hourly_rate,monthly_hours,annual_frequency,products,admin_savings,product_savings,total_savings,total_display")
        );
        assert_eq!(lines.next(), Some("1,10,20,5,4,tshirt;hoodie,840,760,1600,\"$1,600\""));
        assert_eq!(lines.next(), None);

        let summary = render_batch_summary(&report, "$");
        assert!(summary.contains("Estimated 1 request(s), skipped 1"));
        assert!(summary.contains("row 2 skipped: bad"));
    }
}
