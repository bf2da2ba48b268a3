use crate::analysis::classifier::Classification;
use crate::dataset::Record;
use crate::standards::{Standard, StandardField, WasteCategory, time_standards};
use serde::Serialize;

/// Number of flagged records that exhibited one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WasteFrequency {
    #[serde(rename = "Waste_Type")]
    pub category: WasteCategory,
    #[serde(rename = "Frequency")]
    pub frequency: usize,
}

/// Summed overrun of one time-denominated field across all records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeDeviation {
    #[serde(serialize_with = "serialize_field")]
    pub field: StandardField,
    pub total: f64,
}

fn serialize_field<S: serde::Serializer>(field: &StandardField, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(field.column_name())
}

/// Whether any record exceeded a standard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WasteOutcome {
    NoWasteDetected,
    /// Ordered by descending frequency; ties keep first-appearance order.
    Detected(Vec<WasteFrequency>),
}

impl WasteOutcome {
    pub fn frequencies(&self) -> &[WasteFrequency] {
        match self {
            Self::NoWasteDetected => &[],
            Self::Detected(frequencies) => frequencies,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }

    /// Distinct detected categories in tag order.
    pub fn categories(&self) -> Vec<WasteCategory> {
        let mut categories: Vec<WasteCategory> =
            self.frequencies().iter().map(|entry| entry.category).collect();
        categories.sort_unstable();
        categories
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteAggregation {
    pub outcome: WasteOutcome,
    pub time_deviations: Vec<TimeDeviation>,
}

impl WasteAggregation {
    /// Total deviation of every time field mapped to `category`.
    pub fn time_impact(&self, category: WasteCategory, standards: &[Standard]) -> f64 {
        standards
            .iter()
            .filter(|standard| standard.category == category)
            .filter_map(|standard| {
                self.time_deviations
                    .iter()
                    .find(|deviation| deviation.field == standard.field)
            })
            .fold(0.0, |acc, deviation| acc + deviation.total)
    }
}

pub fn aggregate(
    records: &[Record],
    classifications: &[Classification],
    standards: &[Standard],
) -> WasteAggregation {
    WasteAggregation {
        outcome: count_categories(classifications),
        time_deviations: time_deviations(records, standards),
    }
}

/// Each flagged record contributes one instance per distinct category.
pub fn count_categories(classifications: &[Classification]) -> WasteOutcome {
    let mut frequencies: Vec<WasteFrequency> = Vec::new();
    for category in classifications
        .iter()
        .flat_map(|classification| classification.categories.iter().copied())
    {
        match frequencies.iter_mut().find(|entry| entry.category == category) {
            Some(entry) => entry.frequency += 1,
            None => frequencies.push(WasteFrequency {
                category,
                frequency: 1,
            }),
        }
    }

    if frequencies.is_empty() {
        return WasteOutcome::NoWasteDetected;
    }
    frequencies.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    WasteOutcome::Detected(frequencies)
}

/// Sum of `max(0, value - limit)` per time field. Missing values add nothing
/// and an all-missing column totals `+0.0`.
pub fn time_deviations(records: &[Record], standards: &[Standard]) -> Vec<TimeDeviation> {
    time_standards(standards)
        .map(|standard| TimeDeviation {
            field: standard.field,
            total: records
                .iter()
                .filter_map(|record| record.value(standard.field))
                .fold(0.0, |acc, value| acc + standard.deviation(value)),
        })
        .collect()
}
