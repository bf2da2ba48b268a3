use crate::dataset::Dataset;
use crate::standards::{STANDARDS, Standard};
use tracing::{info, warn};

pub mod aggregator;
pub mod annotator;
pub mod classifier;
pub mod guidance;
pub mod ranking;

use aggregator::{WasteAggregation, WasteOutcome, aggregate};
use annotator::{AnnotatedDataset, annotate};
use guidance::{Guidance, LEAN_SOLUTIONS, guidance_table};
use ranking::{PriorityEntry, rank};

/// Everything the report needs from one pass over a dataset.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub annotated: AnnotatedDataset,
    pub aggregation: WasteAggregation,
    pub priorities: Vec<PriorityEntry>,
    pub guidance: Vec<Guidance>,
}

impl Analysis {
    pub fn outcome(&self) -> &WasteOutcome {
        &self.aggregation.outcome
    }

    pub fn no_waste_detected(&self) -> bool {
        !self.aggregation.outcome.is_detected()
    }
}

/// Run the analysis with the built-in standards catalog.
pub fn analyze(dataset: Dataset) -> Analysis {
    analyze_with(dataset, &STANDARDS)
}

pub fn analyze_with(dataset: Dataset, standards: &[Standard]) -> Analysis {
    let annotated = annotate(dataset, standards);
    let aggregation = aggregate(
        annotated.dataset().records(),
        annotated.classifications(),
        standards,
    );

    if !aggregation.outcome.is_detected() {
        warn!(records = annotated.dataset().len(), "No waste detected");
        return Analysis {
            annotated,
            aggregation,
            priorities: Vec::new(),
            guidance: Vec::new(),
        };
    }

    let priorities = rank(&aggregation, annotated.classifications(), standards);
    let guidance = guidance_table(&LEAN_SOLUTIONS, &aggregation.outcome.categories());
    info!(
        records = annotated.dataset().len(),
        flagged = annotated.flagged_count(),
        categories = priorities.len(),
        "Waste analysis complete"
    );

    Analysis {
        annotated,
        aggregation,
        priorities,
        guidance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{Severity, WasteCategory};
    use polars::prelude::*;

    fn dataset(frame: DataFrame) -> Result<Dataset, crate::error::AppError> {
        Dataset::from_frame(frame, &STANDARDS)
    }

    #[test]
    fn clean_dataset_skips_ranking_and_guidance() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "Cycle_Time_sec" => [Some(10.0), None],
            "Idle_Time_sec" => [Some(0.0), None],
            "Defect_Count" => [Some(0.0), None],
            "Distance_Moved_m" => [Some(4.0), None],
            "Motion_Time_sec" => [Some(6.0), None]
        )?;

        let analysis = analyze(dataset(frame)?);

        assert!(analysis.no_waste_detected());
        assert!(analysis.priorities.is_empty());
        assert!(analysis.guidance.is_empty());
        assert_eq!(analysis.annotated.labels(), vec!["OPTIMAL", "OPTIMAL"]);
        Ok(())
    }

    #[test]
    fn every_summary_category_is_ranked_once() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "Cycle_Time_sec" => [20.0, 13.0, 11.0, 9.0],
            "Idle_Time_sec" => [5.0, 0.0, 1.5, 0.0],
            "Defect_Count" => [1.0, 0.0, 0.0, 2.0],
            "Distance_Moved_m" => [10.0, 2.0, 7.0, 1.0],
            "Motion_Time_sec" => [10.0, 3.0, 6.5, 2.0]
        )?;

        let analysis = analyze(dataset(frame)?);

        let mut ranked: Vec<WasteCategory> =
            analysis.priorities.iter().map(|e| e.category).collect();
        ranked.sort_unstable();
        assert_eq!(ranked, analysis.outcome().categories());
        assert_eq!(analysis.guidance.len(), 3);

        // Row 0 hits all five standards, so every category it carries is critical.
        assert!(
            analysis
                .priorities
                .iter()
                .all(|entry| entry.urgency == Severity::Critical)
        );
        assert_eq!(analysis.priorities[0].category, WasteCategory::Waiting);
        Ok(())
    }
}
