use crate::dataset::Record;
use crate::standards::{Severity, Standard, WasteCategory};
use std::collections::BTreeSet;
use std::fmt;

/// Structured result of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Number of exceeded standards, counting repeats of the same category.
    pub hit_count: usize,
    pub severity: Severity,
    /// Distinct categories that fired, in tag order.
    pub categories: BTreeSet<WasteCategory>,
}

impl Classification {
    pub fn has_waste(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn contains(&self, category: WasteCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Display label, e.g. `WASTE | MOTION, WAITING` or `OPTIMAL`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if self.has_waste() {
            let tags: Vec<&str> = self.categories.iter().map(|c| c.tag()).collect();
            write!(f, " | {}", tags.join(", "))?;
        }
        Ok(())
    }
}

/// Classify one record. Missing values are skipped and never count as a hit.
pub fn classify(record: &Record, standards: &[Standard]) -> Classification {
    let mut hit_count = 0;
    let mut categories = BTreeSet::new();
    for standard in standards {
        let Some(value) = record.value(standard.field) else {
            continue;
        };
        if standard.is_exceeded_by(value) {
            hit_count += 1;
            categories.insert(standard.category);
        }
    }

    Classification {
        hit_count,
        severity: Severity::from_hit_count(hit_count),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{STANDARDS, StandardField};
    use proptest::prelude::*;

    fn record(values: [Option<f64>; 5]) -> Record {
        Record {
            cycle_time_sec: values[0],
            idle_time_sec: values[1],
            defect_count: values[2],
            distance_moved_m: values[3],
            motion_time_sec: values[4],
        }
    }

    #[test]
    fn all_fields_exceeded_is_critical() {
        let row = record([Some(20.0), Some(5.0), Some(1.0), Some(10.0), Some(10.0)]);

        let result = classify(&row, &STANDARDS);

        assert_eq!(result.hit_count, 5);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.label(), "CRITICAL | DEFECTS, MOTION, WAITING");
    }

    #[test]
    fn all_fields_missing_is_optimal_without_categories() {
        let result = classify(&Record::default(), &STANDARDS);

        assert_eq!(result.hit_count, 0);
        assert!(result.categories.is_empty());
        assert_eq!(result.label(), "OPTIMAL");
    }

    #[test]
    fn repeated_category_counts_twice_but_displays_once() {
        let row = record([Some(20.0), Some(3.0), Some(0.0), Some(1.0), Some(1.0)]);

        let result = classify(&row, &STANDARDS);

        assert_eq!(result.hit_count, 2);
        assert_eq!(
            result.categories.iter().copied().collect::<Vec<_>>(),
            vec![WasteCategory::Waiting]
        );
        assert_eq!(result.label(), "OPTIMAL | WAITING");
    }

    #[test]
    fn hit_count_not_category_count_drives_severity() {
        let standards = [
            Standard {
                field: StandardField::CycleTime,
                limit: 12.0,
                category: WasteCategory::Waiting,
            },
            Standard {
                field: StandardField::DistanceMoved,
                limit: 5.0,
                category: WasteCategory::Motion,
            },
        ];
        let row = record([Some(20.0), None, None, Some(3.0), None]);

        let result = classify(&row, &standards);

        assert_eq!(result.hit_count, 1);
        assert_eq!(result.severity, Severity::Optimal);
        assert_eq!(result.label(), "OPTIMAL | WAITING");
    }

    #[test]
    fn values_at_the_limit_do_not_fire() {
        let row = record([Some(12.0), Some(0.0), Some(0.0), Some(5.0), Some(6.0)]);

        let result = classify(&row, &STANDARDS);

        assert_eq!(result.hit_count, 0);
        assert_eq!(result.severity, Severity::Optimal);
    }

    #[test]
    fn three_hits_is_waste() {
        let row = record([None, Some(1.0), Some(2.0), Some(7.0), None]);

        let result = classify(&row, &STANDARDS);

        assert_eq!(result.severity, Severity::Waste);
        assert_eq!(result.label(), "WASTE | DEFECTS, MOTION, WAITING");
    }

    fn any_value() -> impl Strategy<Value = Option<f64>> {
        prop::option::of(-5.0..30.0f64)
    }

    proptest! {
        #[test]
        fn prop_classification_is_consistent(
            values in prop::array::uniform5(any_value()),
            rotation in 0usize..5,
        ) {
            let row = record(values);
            let result = classify(&row, &STANDARDS);

            let expected_hits = STANDARDS
                .iter()
                .filter(|standard| {
                    row.value(standard.field)
                        .is_some_and(|value| standard.is_exceeded_by(value))
                })
                .count();
            prop_assert_eq!(result.hit_count, expected_hits);
            prop_assert_eq!(result.severity, Severity::from_hit_count(expected_hits));
            prop_assert_eq!(result.has_waste(), expected_hits > 0);
            prop_assert!(result.categories.len() <= result.hit_count);

            let mut rotated = STANDARDS;
            rotated.rotate_left(rotation);
            prop_assert_eq!(classify(&row, &rotated), result.clone());

            let label = result.label();
            prop_assert!(label.starts_with(result.severity.label()));
            let tags: Vec<&str> = result.categories.iter().map(|c| c.tag()).collect();
            let mut sorted = tags.clone();
            sorted.sort_unstable();
            prop_assert_eq!(tags, sorted);
        }
    }
}
