pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::EstimateForm;
#[cfg(feature = "cli")]
use crate::utils::error::{EstimatorError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub const DISPLAY_FORMATS: &[&str] = &["text", "json"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "savings-estimator")]
#[command(about = "Estimate annual savings from consolidated merchandise ordering")]
pub struct CliConfig {
    /// Number of employees receiving products
    #[arg(long)]
    pub employees: Option<String>,

    /// Hourly cost of administrative staff
    #[arg(long)]
    pub hourly_rate: Option<String>,

    /// Hours per month spent administering orders
    #[arg(long)]
    pub monthly_hours: Option<String>,

    /// Orders placed per year
    #[arg(long)]
    pub frequency: Option<String>,

    /// Selected product ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub products: Vec<String>,

    /// Optional TOML file with products and assumptions
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "text", help = "Output format: text or json")]
    pub format: String,

    #[arg(long, help = "Print the product savings table and exit")]
    pub list_products: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Reads the estimate fields; a missing flag is reported as a validation error.
    pub fn to_form(&self) -> Result<EstimateForm> {
        Ok(EstimateForm {
            employee_count: required_arg("employee_count", &self.employees)?,
            hourly_rate: required_arg("hourly_rate", &self.hourly_rate)?,
            monthly_hours: required_arg("monthly_hours", &self.monthly_hours)?,
            annual_frequency: required_arg("annual_frequency", &self.frequency)?,
            products: self.products.clone(),
        })
    }

    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

#[cfg(feature = "cli")]
fn required_arg(field_name: &str, value: &Option<String>) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| EstimatorError::validation(field_name, "", "value is required"))
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_one_of("format", &self.format, DISPLAY_FORMATS)?;
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        Ok(())
    }
}
