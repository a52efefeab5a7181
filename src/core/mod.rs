pub mod calculator;
pub mod engine;
pub mod pipeline;
pub mod report;
pub mod savings_table;

pub use crate::domain::model::{EstimateForm, EstimateRequest, EstimateResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SavingsLookup, Storage};
pub use crate::utils::error::Result;
