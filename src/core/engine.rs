use crate::domain::model::BatchReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: String,
    pub report: BatchReport,
}

pub struct EstimateEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EstimateEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting batch estimate");

        let forms = self.pipeline.extract()?;
        tracing::info!("Extracted {} request rows", forms.len());

        let output = self.pipeline.transform(forms)?;
        tracing::info!(
            "Estimated {} rows, skipped {}",
            output.rows.len(),
            output.skipped.len()
        );

        let report = BatchReport::new(output.rows, output.skipped);
        let output_path = self.pipeline.load(report.clone())?;
        tracing::info!("Reports saved to: {}", output_path);

        Ok(RunOutcome {
            output_path,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EstimateForm, EstimateResult, SkippedRow};
    use crate::domain::ports::{NumberedForms, TransformOutput};
    use crate::utils::error::EstimatorError;
    use std::cell::RefCell;

    struct MemoryPipeline {
        forms: Vec<EstimateForm>,
        loaded: RefCell<Option<BatchReport>>,
    }

    impl Pipeline for MemoryPipeline {
        fn extract(&self) -> Result<NumberedForms> {
            Ok(self
                .forms
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, form)| (index + 1, Ok(form)))
                .collect())
        }

        fn transform(&self, forms: NumberedForms) -> Result<TransformOutput> {
            Ok(TransformOutput {
                rows: vec![],
                skipped: forms
                    .into_iter()
                    .map(|(row, _)| SkippedRow {
                        row,
                        reason: "not estimated".to_string(),
                    })
                    .collect(),
            })
        }

        fn load(&self, report: BatchReport) -> Result<String> {
            *self.loaded.borrow_mut() = Some(report);
            Ok("memory".to_string())
        }
    }

    struct FailingPipeline;

    impl Pipeline for FailingPipeline {
        fn extract(&self) -> Result<NumberedForms> {
            Err(EstimatorError::ConfigError {
                message: "no input".to_string(),
            })
        }

        fn transform(&self, _forms: NumberedForms) -> Result<TransformOutput> {
            unreachable!("transform after failed extract")
        }

        fn load(&self, _report: BatchReport) -> Result<String> {
            unreachable!("load after failed extract")
        }
    }

    #[test]
    fn test_run_passes_report_to_load() {
        let pipeline = MemoryPipeline {
            forms: vec![EstimateForm::default(), EstimateForm::default()],
            loaded: RefCell::new(None),
        };
        let engine = EstimateEngine::new(pipeline);

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.output_path, "memory");
        assert_eq!(outcome.report.skipped.len(), 2);
        assert_eq!(outcome.report.totals, EstimateResult::default());

        let loaded = engine.pipeline.loaded.borrow();
        assert_eq!(loaded.as_ref().map(|r| r.skipped.len()), Some(2));
    }

    #[test]
    fn test_run_stops_on_extract_error() {
        let engine = EstimateEngine::new(FailingPipeline);
        assert!(matches!(engine.run(), Err(EstimatorError::ConfigError { .. })));
    }
}
