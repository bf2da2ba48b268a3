use crate::analysis::aggregator::{WasteAggregation, WasteOutcome};
use crate::analysis::classifier::Classification;
use crate::standards::{Severity, Standard, WasteCategory};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorityEntry {
    #[serde(rename = "Waste_Type")]
    pub category: WasteCategory,
    #[serde(rename = "Frequency")]
    pub frequency: usize,
    #[serde(rename = "Time_Impact")]
    pub time_impact: f64,
    #[serde(rename = "Urgency")]
    pub urgency: Severity,
    #[serde(rename = "Priority_Score")]
    pub priority_score: f64,
}

/// Round to two decimals for presentation. Negative zero becomes `0.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Worst severity among records whose category set includes `category`.
pub fn urgency(category: WasteCategory, classifications: &[Classification]) -> Severity {
    classifications
        .iter()
        .filter(|classification| classification.contains(category))
        .map(|classification| classification.severity)
        .max()
        .unwrap_or(Severity::Optimal)
}

/// Rank every category of the frequency table, highest score first.
///
/// `priority_score = frequency + time_impact + urgency weight`.
///
/// Returns an empty table when no waste was detected; callers distinguish that
/// case through [`WasteOutcome::NoWasteDetected`].
pub fn rank(
    aggregation: &WasteAggregation,
    classifications: &[Classification],
    standards: &[Standard],
) -> Vec<PriorityEntry> {
    let WasteOutcome::Detected(frequencies) = &aggregation.outcome else {
        return Vec::new();
    };

    let mut table: Vec<PriorityEntry> = frequencies
        .iter()
        .map(|entry| {
            let time_impact = aggregation.time_impact(entry.category, standards);
            let urgency = urgency(entry.category, classifications);
            let score = entry.frequency as f64 + time_impact + urgency.weight();
            PriorityEntry {
                category: entry.category,
                frequency: entry.frequency,
                time_impact: round2(time_impact),
                urgency,
                priority_score: round2(score),
            }
        })
        .collect();

    // Stable: equal scores keep frequency-table order.
    table.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::{TimeDeviation, WasteFrequency};
    use crate::standards::{STANDARDS, StandardField};
    use std::collections::BTreeSet;

    fn classification(severity: Severity, categories: &[WasteCategory]) -> Classification {
        Classification {
            hit_count: 0,
            severity,
            categories: categories.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn aggregation(frequencies: Vec<WasteFrequency>, deviations: [f64; 3]) -> WasteAggregation {
        WasteAggregation {
            outcome: WasteOutcome::Detected(frequencies),
            time_deviations: vec![
                TimeDeviation {
                    field: StandardField::CycleTime,
                    total: deviations[0],
                },
                TimeDeviation {
                    field: StandardField::IdleTime,
                    total: deviations[1],
                },
                TimeDeviation {
                    field: StandardField::MotionTime,
                    total: deviations[2],
                },
            ],
        }
    }

    #[test]
    fn urgency_inherits_worst_co_occurring_severity() {
        let classifications = vec![
            classification(Severity::Optimal, &[WasteCategory::Motion]),
            classification(
                Severity::Critical,
                &[WasteCategory::Motion, WasteCategory::Waiting],
            ),
            classification(Severity::Waste, &[WasteCategory::Defects]),
        ];

        assert_eq!(
            urgency(WasteCategory::Motion, &classifications),
            Severity::Critical
        );
        assert_eq!(
            urgency(WasteCategory::Defects, &classifications),
            Severity::Waste
        );
        assert_eq!(
            urgency(WasteCategory::Waiting, &classifications),
            Severity::Critical
        );
    }

    #[test]
    fn urgency_without_rows_is_optimal() {
        assert_eq!(urgency(WasteCategory::Motion, &[]), Severity::Optimal);
    }

    #[test]
    fn score_combines_frequency_time_and_urgency() {
        let classifications = vec![
            classification(Severity::Waste, &[WasteCategory::Waiting]),
            classification(Severity::Optimal, &[WasteCategory::Defects]),
        ];
        let aggregation = aggregation(
            vec![
                WasteFrequency {
                    category: WasteCategory::Waiting,
                    frequency: 1,
                },
                WasteFrequency {
                    category: WasteCategory::Defects,
                    frequency: 1,
                },
            ],
            [2.504, 1.0, 0.0],
        );

        let table = rank(&aggregation, &classifications, &STANDARDS);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].category, WasteCategory::Waiting);
        assert_eq!(table[0].time_impact, 3.5);
        assert_eq!(table[0].urgency, Severity::Waste);
        assert_eq!(table[0].priority_score, 5.5);
        assert_eq!(table[1].category, WasteCategory::Defects);
        assert_eq!(table[1].priority_score, 1.0);
    }

    #[test]
    fn table_is_sorted_and_ties_keep_input_order() {
        let classifications = vec![
            classification(Severity::Optimal, &[WasteCategory::Defects]),
            classification(Severity::Optimal, &[WasteCategory::Motion]),
            classification(Severity::Optimal, &[WasteCategory::Waiting]),
        ];
        let aggregation = aggregation(
            vec![
                WasteFrequency {
                    category: WasteCategory::Defects,
                    frequency: 1,
                },
                WasteFrequency {
                    category: WasteCategory::Motion,
                    frequency: 1,
                },
                WasteFrequency {
                    category: WasteCategory::Waiting,
                    frequency: 1,
                },
            ],
            [0.0, 0.0, 3.0],
        );

        let table = rank(&aggregation, &classifications, &STANDARDS);
        let order: Vec<WasteCategory> = table.iter().map(|e| e.category).collect();

        assert_eq!(
            order,
            vec![
                WasteCategory::Motion,
                WasteCategory::Defects,
                WasteCategory::Waiting,
            ]
        );
        assert!(
            table
                .windows(2)
                .all(|pair| pair[0].priority_score >= pair[1].priority_score)
        );
    }

    #[test]
    fn round2_drops_negative_zero() {
        assert!(!round2(-0.0).is_sign_negative());
        assert!(!round2(-0.001).is_sign_negative());
        assert_eq!(round2(2.345_1), 2.35);
    }

    #[test]
    fn category_without_time_fields_has_unsigned_zero_impact()
    -> Result<(), Box<dyn std::error::Error>> {
        let classifications = vec![classification(Severity::Optimal, &[WasteCategory::Defects])];
        let aggregation = aggregation(
            vec![WasteFrequency {
                category: WasteCategory::Defects,
                frequency: 1,
            }],
            [0.0, 0.0, 0.0],
        );

        let table = rank(&aggregation, &classifications, &STANDARDS);

        assert_eq!(table.len(), 1);
        assert!(!table[0].time_impact.is_sign_negative());
        assert_eq!(table[0].priority_score, 1.0);
        let json = serde_json::to_value(table[0])?;
        assert_eq!(json["Time_Impact"].to_string(), "0.0");
        Ok(())
    }

    #[test]
    fn no_waste_yields_empty_table() {
        let aggregation = WasteAggregation {
            outcome: WasteOutcome::NoWasteDetected,
            time_deviations: Vec::new(),
        };

        assert!(rank(&aggregation, &[], &STANDARDS).is_empty());
    }
}
