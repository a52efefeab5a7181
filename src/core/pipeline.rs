use crate::core::calculator::SavingsCalculator;
use crate::core::report;
use crate::core::savings_table::ProductSavingsTable;
use crate::domain::model::{BatchReport, EstimateForm, EstimateRow, SkippedRow};
use crate::domain::ports::{
    ConfigProvider, InvalidRowPolicy, NumberedForms, Pipeline, Storage, TransformOutput,
};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::validate_form;
use serde::Deserialize;
use std::path::Path;

pub const CSV_REPORT_FILE: &str = "estimates.csv";
pub const JSON_REPORT_FILE: &str = "estimates.json";

/// One line of the request file. `products` holds ids separated by `;` or `|`.
#[derive(Debug, Deserialize)]
struct RequestRow {
    employee_count: String,
    hourly_rate: String,
    monthly_hours: String,
    annual_frequency: String,
    #[serde(default)]
    products: String,
}

impl From<RequestRow> for EstimateForm {
    fn from(row: RequestRow) -> Self {
        EstimateForm {
            employee_count: row.employee_count,
            hourly_rate: row.hourly_rate,
            monthly_hours: row.monthly_hours,
            annual_frequency: row.annual_frequency,
            products: row
                .products
                .split([';', '|'])
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Reads a CSV of requests, estimates each row and writes the reports.
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) table: ProductSavingsTable,
    pub(crate) calculator: SavingsCalculator,
    pub(crate) currency_symbol: String,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(
        storage: S,
        config: C,
        table: ProductSavingsTable,
        calculator: SavingsCalculator,
    ) -> Self {
        Self {
            storage,
            config,
            table,
            calculator,
            currency_symbol: crate::utils::formatting::DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    fn report_path(&self, file_name: &str) -> String {
        Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    fn extract(&self) -> Result<NumberedForms> {
        let data = self.storage.read_file(self.config.input_file())?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut forms = Vec::new();
        for (index, row) in reader.deserialize::<RequestRow>().enumerate() {
            match row {
                Ok(row) => forms.push((index + 1, Ok(EstimateForm::from(row)))),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => forms.push((index + 1, Err(e.into()))),
            }
        }

        tracing::debug!("Read {} request rows from {}", forms.len(), self.config.input_file());
        Ok(forms)
    }

    fn transform(&self, forms: NumberedForms) -> Result<TransformOutput> {
        let mut output = TransformOutput::default();

        for (row, form) in forms {
            match form.and_then(|form| validate_form(&form)) {
                Ok(request) => {
                    let result = self.calculator.compute(&request, &self.table);
                    for id in &request.selected_products {
                        if !self.table.contains(id) {
                            tracing::debug!("Row {}: unknown product '{}' counts as zero", row, id);
                        }
                    }
                    output.rows.push(EstimateRow {
                        row,
                        request,
                        result,
                    });
                }
                Err(e) => match self.config.on_invalid_row() {
                    InvalidRowPolicy::Skip => {
                        tracing::warn!("Skipping row {}: {}", row, e);
                        output.skipped.push(SkippedRow {
                            row,
                            reason: e.to_string(),
                        });
                    }
                    InvalidRowPolicy::Fail => {
                        tracing::error!("Row {} is invalid: {}", row, e);
                        return Err(e);
                    }
                },
            }
        }

        Ok(output)
    }

    fn load(&self, report: BatchReport) -> Result<String> {
        for format in self.config.output_formats() {
            let (file_name, data) = match format.as_str() {
                "csv" => (CSV_REPORT_FILE, report::render_csv(&report, &self.currency_symbol)?),
                "json" => (JSON_REPORT_FILE, report::render_batch_json(&report)?),
                other => {
                    return Err(EstimatorError::ReportError {
                        message: format!("unsupported output format '{}'", other),
                    })
                }
            };
            let path = self.report_path(file_name);
            self.storage.write_file(&path, &data)?;
            tracing::info!("Wrote {} report to {}", format, path);
        }

        Ok(self.config.output_path().to_string())
    }
}
