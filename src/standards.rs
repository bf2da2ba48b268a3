use serde::Serialize;
use std::fmt;

/// Lean waste categories detected by the classifier.
///
/// Declaration order is alphabetical by tag so that the derived `Ord` sorts
/// categories the same way their display tags sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteCategory {
    Defects,
    Motion,
    Waiting,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 3] = [Self::Defects, Self::Motion, Self::Waiting];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Defects => "DEFECTS",
            Self::Motion => "MOTION",
            Self::Waiting => "WAITING",
        }
    }

    /// Pie slice color used by the report chart.
    pub fn chart_color(self) -> &'static str {
        match self {
            Self::Waiting => "#FFD966",
            Self::Motion => "#9DC3E6",
            Self::Defects => "#F4B084",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Record severity, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Optimal,
    Waste,
    Critical,
}

impl Severity {
    /// Step function over the number of threshold hits on one record.
    pub fn from_hit_count(count: usize) -> Self {
        if count > 4 {
            Self::Critical
        } else if count > 2 {
            Self::Waste
        } else {
            Self::Optimal
        }
    }

    /// Weight added to a category's priority score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Optimal => 0.0,
            Self::Waste => 1.0,
            Self::Critical => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Waste => "WASTE",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measured columns that carry a standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardField {
    CycleTime,
    IdleTime,
    DefectCount,
    DistanceMoved,
    MotionTime,
}

impl StandardField {
    pub fn column_name(self) -> &'static str {
        match self {
            Self::CycleTime => "Cycle_Time_sec",
            Self::IdleTime => "Idle_Time_sec",
            Self::DefectCount => "Defect_Count",
            Self::DistanceMoved => "Distance_Moved_m",
            Self::MotionTime => "Motion_Time_sec",
        }
    }

    /// Time-denominated fields take part in the time-deviation totals.
    pub fn is_time(self) -> bool {
        self.column_name().contains("Time")
    }
}

impl fmt::Display for StandardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One row of the standards catalog: upper limit plus the waste it signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standard {
    pub field: StandardField,
    pub limit: f64,
    pub category: WasteCategory,
}

impl Standard {
    pub fn is_exceeded_by(&self, value: f64) -> bool {
        value > self.limit
    }

    /// Amount by which `value` exceeds the limit, floored at zero.
    pub fn deviation(&self, value: f64) -> f64 {
        (value - self.limit).max(0.0)
    }
}

pub const STANDARDS: [Standard; 5] = [
    Standard {
        field: StandardField::CycleTime,
        limit: 12.0,
        category: WasteCategory::Waiting,
    },
    Standard {
        field: StandardField::IdleTime,
        limit: 0.0,
        category: WasteCategory::Waiting,
    },
    Standard {
        field: StandardField::DefectCount,
        limit: 0.0,
        category: WasteCategory::Defects,
    },
    Standard {
        field: StandardField::DistanceMoved,
        limit: 5.0,
        category: WasteCategory::Motion,
    },
    Standard {
        field: StandardField::MotionTime,
        limit: 6.0,
        category: WasteCategory::Motion,
    },
];

/// Standards whose field is time-denominated.
pub fn time_standards(standards: &[Standard]) -> impl Iterator<Item = &Standard> {
    standards.iter().filter(|standard| standard.field.is_time())
}
