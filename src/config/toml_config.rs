use crate::core::calculator::SavingsAssumptions;
use crate::core::savings_table::ProductSavingsTable;
use crate::domain::ports::{ConfigProvider, InvalidRowPolicy};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::formatting::DEFAULT_CURRENCY_SYMBOL;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const OUTPUT_FORMATS: &[&str] = &["csv", "json"];
pub const INVALID_ROW_POLICIES: &[&str] = &["skip", "fail"];
pub const LOG_FORMATS: &[&str] = &["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub assumptions: AssumptionsConfig,
    /// Product id -> unit savings. Falls back to the built-in table when absent.
    pub products: Option<BTreeMap<String, Decimal>>,
    pub batch: Option<BatchConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub name: Option<String>,
    pub currency_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssumptionsConfig {
    pub admin_recovery_rate: Option<Decimal>,
    pub units_per_employee_per_order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub input_file: String,
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    pub on_invalid_row: Option<String>,
}

fn default_output_formats() -> Vec<String> {
    OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimatorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn savings_table(&self) -> Result<ProductSavingsTable> {
        match &self.products {
            Some(products) => ProductSavingsTable::new(
                products.iter().map(|(id, amount)| (id.clone(), *amount)),
            ),
            None => Ok(ProductSavingsTable::builtin()),
        }
    }

    pub fn assumptions(&self) -> SavingsAssumptions {
        let defaults = SavingsAssumptions::default();
        SavingsAssumptions {
            admin_recovery_rate: self
                .assumptions
                .admin_recovery_rate
                .unwrap_or(defaults.admin_recovery_rate),
            units_per_employee_per_order: self
                .assumptions
                .units_per_employee_per_order
                .unwrap_or(defaults.units_per_employee_per_order),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        self.estimator
            .currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    pub fn name(&self) -> &str {
        self.estimator.name.as_deref().unwrap_or("savings estimate")
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn require_batch(&self) -> Result<&BatchConfig> {
        validation::validate_required_field("batch", &self.batch)
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(rate) = self.assumptions.admin_recovery_rate {
            validation::validate_range(
                "assumptions.admin_recovery_rate",
                rate,
                Decimal::ZERO,
                dec!(1),
            )?;
        }

        if let Some(units) = self.assumptions.units_per_employee_per_order {
            validation::validate_range(
                "assumptions.units_per_employee_per_order",
                units,
                0,
                validation::MAX_UNITS_PER_EMPLOYEE_PER_ORDER,
            )?;
        }

        if let Some(symbol) = &self.estimator.currency_symbol {
            validation::validate_non_empty_string("estimator.currency_symbol", symbol)?;
        }

        // Surfaces negative amounts and empty ids.
        self.savings_table()?;

        if let Some(batch) = &self.batch {
            batch.validate()?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validation::validate_one_of("logging.format", format, LOG_FORMATS)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("batch.input_file", &self.input_file)?;
        validation::validate_path("batch.output_path", &self.output_path)?;

        if self.output_formats.is_empty() {
            return Err(EstimatorError::InvalidConfigValueError {
                field: "batch.output_formats".to_string(),
                value: String::new(),
                reason: "at least one output format is required".to_string(),
            });
        }
        for format in &self.output_formats {
            validation::validate_one_of("batch.output_formats", format, OUTPUT_FORMATS)?;
        }

        if let Some(policy) = &self.on_invalid_row {
            validation::validate_one_of("batch.on_invalid_row", policy, INVALID_ROW_POLICIES)?;
        }
        Ok(())
    }
}

impl ConfigProvider for BatchConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn on_invalid_row(&self) -> InvalidRowPolicy {
        match self.on_invalid_row.as_deref() {
            Some("fail") => InvalidRowPolicy::Fail,
            _ => InvalidRowPolicy::Skip,
        }
    }
}
