use crate::domain::model::{BatchReport, EstimateForm, EstimateRow, SkippedRow};
use crate::utils::error::Result;
use rust_decimal::Decimal;

/// Read-only unit savings lookup used by the calculator.
pub trait SavingsLookup: Send + Sync {
    /// `None` for identifiers the table does not know.
    fn unit_savings(&self, product_id: &str) -> Option<Decimal>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRowPolicy {
    #[default]
    Skip,
    Fail,
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn on_invalid_row(&self) -> InvalidRowPolicy;
}

/// Extracted forms keyed by their 1-based row number. A row that could not
/// be read as a request carries its read error.
pub type NumberedForms = Vec<(usize, Result<EstimateForm>)>;

#[derive(Debug, Clone, Default)]
pub struct TransformOutput {
    pub rows: Vec<EstimateRow>,
    pub skipped: Vec<SkippedRow>,
}

pub trait Pipeline {
    fn extract(&self) -> Result<NumberedForms>;
    fn transform(&self, forms: NumberedForms) -> Result<TransformOutput>;
    fn load(&self, report: BatchReport) -> Result<String>;
}
