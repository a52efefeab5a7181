use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Raw form values as read from the command line or a request file,
/// before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateForm {
    pub employee_count: String,
    pub hourly_rate: String,
    pub monthly_hours: String,
    pub annual_frequency: String,
    pub products: Vec<String>,
}

/// Validated calculator input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub employee_count: u32,
    pub hourly_rate: Decimal,
    pub monthly_hours: Decimal,
    pub annual_frequency: u32,
    /// Duplicates are kept; each occurrence is counted.
    pub selected_products: Vec<String>,
}

/// Annual savings breakdown. Values are exact; round only for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub admin_savings: Decimal,
    pub product_savings: Decimal,
    pub total_savings: Decimal,
}

impl EstimateResult {
    pub fn new(admin_savings: Decimal, product_savings: Decimal) -> Self {
        Self {
            admin_savings,
            product_savings,
            total_savings: admin_savings + product_savings,
        }
    }

    /// Whole currency units, half away from zero.
    pub fn rounded(&self) -> EstimateResult {
        EstimateResult {
            admin_savings: round_display(self.admin_savings),
            product_savings: round_display(self.product_savings),
            total_savings: round_display(self.total_savings),
        }
    }
}

impl std::ops::Add for EstimateResult {
    type Output = EstimateResult;

    fn add(self, other: EstimateResult) -> EstimateResult {
        EstimateResult::new(
            self.admin_savings + other.admin_savings,
            self.product_savings + other.product_savings,
        )
    }
}

impl std::iter::Sum for EstimateResult {
    fn sum<I: Iterator<Item = EstimateResult>>(iter: I) -> Self {
        iter.fold(EstimateResult::default(), |acc, r| acc + r)
    }
}

pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// One computed row of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRow {
    /// 1-based data row number in the request file.
    pub row: usize,
    pub request: EstimateRequest,
    pub result: EstimateResult,
}

/// A request row that did not pass validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<EstimateRow>,
    pub skipped: Vec<SkippedRow>,
    pub totals: EstimateResult,
}

impl BatchReport {
    pub fn new(rows: Vec<EstimateRow>, skipped: Vec<SkippedRow>) -> Self {
        let totals = rows.iter().map(|r| r.result).sum();
        Self {
            generated_at: Utc::now(),
            rows,
            skipped,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_result_total_is_sum() {
        let result = EstimateResult::new(dec!(840), dec!(760));
        assert_eq!(result.total_savings, dec!(1600));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_display(dec!(2.5)), dec!(3));
        assert_eq!(round_display(dec!(3.5)), dec!(4));
        assert_eq!(round_display(dec!(2.49)), dec!(2));
        assert_eq!(round_display(dec!(0.5)), dec!(1));
    }

    #[test]
    fn test_report_totals() {
        let request = EstimateRequest {
            employee_count: 1,
            hourly_rate: dec!(10),
            monthly_hours: dec!(1),
            annual_frequency: 1,
            selected_products: vec![],
        };
        let rows = vec![
            EstimateRow {
                row: 1,
                request: request.clone(),
                result: EstimateResult::new(dec!(84), dec!(7)),
            },
            EstimateRow {
                row: 2,
                request,
                result: EstimateResult::new(dec!(16), dec!(3)),
            },
        ];
        let report = BatchReport::new(rows, vec![]);
        assert_eq!(report.totals, EstimateResult::new(dec!(100), dec!(10)));
        assert_eq!(report.totals.total_savings, dec!(110));
    }
}
