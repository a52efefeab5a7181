pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    calculator::{compute, SavingsAssumptions, SavingsCalculator},
    engine::EstimateEngine,
    pipeline::BatchPipeline,
    savings_table::ProductSavingsTable,
};
pub use domain::model::{EstimateForm, EstimateRequest, EstimateResult};
pub use utils::error::{EstimatorError, Result};
