use crate::analysis::Analysis;
use crate::analysis::aggregator::{TimeDeviation, WasteFrequency};
use crate::analysis::guidance::Guidance;
use crate::analysis::ranking::{PriorityEntry, round2};
use crate::error::AppError;
use serde::Serialize;
use std::path::Path;
use std::time::SystemTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

/// Machine-readable companion to the workbook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisSummary<'a> {
    pub generated_at: String,
    pub record_count: usize,
    pub flagged_count: usize,
    pub no_waste_detected: bool,
    pub time_deviations: Vec<TimeDeviation>,
    pub waste_summary: &'a [WasteFrequency],
    pub priority_ranking: &'a [PriorityEntry],
    pub lean_solutions: &'a [Guidance],
}

impl<'a> AnalysisSummary<'a> {
    pub fn new(analysis: &'a Analysis, generated_at: SystemTime) -> Result<Self, AppError> {
        Ok(Self {
            generated_at: format_timestamp(generated_at)?,
            record_count: analysis.annotated.dataset().len(),
            flagged_count: analysis.annotated.flagged_count(),
            no_waste_detected: analysis.no_waste_detected(),
            time_deviations: analysis
                .aggregation
                .time_deviations
                .iter()
                .map(|deviation| TimeDeviation {
                    field: deviation.field,
                    total: round2(deviation.total),
                })
                .collect(),
            waste_summary: analysis.outcome().frequencies(),
            priority_ranking: &analysis.priorities,
            lean_solutions: &analysis.guidance,
        })
    }
}

fn format_timestamp(timestamp: SystemTime) -> Result<String, AppError> {
    Ok(OffsetDateTime::from(timestamp).format(&Rfc3339)?)
}

pub fn write_summary(analysis: &Analysis, path: impl AsRef<Path>) -> Result<(), AppError> {
    let path = path.as_ref();
    let summary = AnalysisSummary::new(analysis, SystemTime::now())?;
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "Summary written");
    Ok(())
}
