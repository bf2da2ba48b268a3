use crate::error::AppError;
use crate::standards::{STANDARDS, Standard, StandardField};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Column appended to the annotated dataset.
pub const STATUS_COLUMN: &str = "PROCESS-STATUS";

/// One production-line measurement row. Absent cells are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Record {
    pub cycle_time_sec: Option<f64>,
    pub idle_time_sec: Option<f64>,
    pub defect_count: Option<f64>,
    pub distance_moved_m: Option<f64>,
    pub motion_time_sec: Option<f64>,
}

impl Record {
    pub fn value(&self, field: StandardField) -> Option<f64> {
        match field {
            StandardField::CycleTime => self.cycle_time_sec,
            StandardField::IdleTime => self.idle_time_sec,
            StandardField::DefectCount => self.defect_count,
            StandardField::DistanceMoved => self.distance_moved_m,
            StandardField::MotionTime => self.motion_time_sec,
        }
    }

    fn set(&mut self, field: StandardField, value: Option<f64>) {
        let slot = match field {
            StandardField::CycleTime => &mut self.cycle_time_sec,
            StandardField::IdleTime => &mut self.idle_time_sec,
            StandardField::DefectCount => &mut self.defect_count,
            StandardField::DistanceMoved => &mut self.distance_moved_m,
            StandardField::MotionTime => &mut self.motion_time_sec,
        };
        *slot = value;
    }
}

/// Loaded table: typed records for analysis plus the raw frame, kept so that
/// extra columns pass through to the report unchanged.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    records: Vec<Record>,
}

impl Dataset {
    /// Read a headered CSV file. Empty cells load as missing values.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        info!(
            path = %path.display(),
            rows = frame.height(),
            columns = frame.width(),
            "Dataset loaded"
        );
        Self::from_frame(frame, &STANDARDS)
    }

    /// Build typed records from `frame`. Every standard column must exist;
    /// cells that are null, not numeric, NaN or infinite become `None`.
    pub fn from_frame(frame: DataFrame, standards: &[Standard]) -> Result<Self, AppError> {
        let mut records = vec![Record::default(); frame.height()];
        for standard in standards {
            let name = standard.field.column_name();
            let column = frame
                .column(name)
                .map_err(|_| AppError::SchemaMismatch { field: name })?;
            let numeric = column.cast(&DataType::Float64)?;
            let values = numeric.as_materialized_series().f64()?;
            for (record, value) in records.iter_mut().zip(values.into_iter()) {
                record.set(standard.field, value.filter(|v| v.is_finite()));
            }
            debug!(
                column = name,
                missing = values.null_count(),
                "Standard column converted"
            );
        }
        Ok(Self { frame, records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the input frame with one label per row appended as
    /// [`STATUS_COLUMN`].
    pub fn with_status_column(&self, labels: Vec<String>) -> Result<DataFrame, AppError> {
        let mut frame = self.frame.clone();
        frame.with_column(Column::new(STATUS_COLUMN.into(), labels))?;
        Ok(frame)
    }
}
