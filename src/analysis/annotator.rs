use crate::analysis::classifier::{Classification, classify};
use crate::dataset::Dataset;
use crate::error::AppError;
use crate::standards::Standard;
use polars::prelude::DataFrame;

/// Dataset paired with one classification per record, in input order.
#[derive(Debug, Clone)]
pub struct AnnotatedDataset {
    dataset: Dataset,
    classifications: Vec<Classification>,
}

impl AnnotatedDataset {
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    pub fn labels(&self) -> Vec<String> {
        self.classifications.iter().map(Classification::label).collect()
    }

    /// Rows that exceeded at least one standard.
    pub fn flagged_count(&self) -> usize {
        self.classifications.iter().filter(|c| c.has_waste()).count()
    }

    /// Input frame with the status label column appended.
    pub fn to_frame(&self) -> Result<DataFrame, AppError> {
        self.dataset.with_status_column(self.labels())
    }
}

/// Classify every record independently. Schema problems surface earlier, when
/// the [`Dataset`] is built, so annotation itself cannot fail.
pub fn annotate(dataset: Dataset, standards: &[Standard]) -> AnnotatedDataset {
    let classifications = dataset
        .records()
        .iter()
        .map(|record| classify(record, standards))
        .collect();
    AnnotatedDataset {
        dataset,
        classifications,
    }
}
