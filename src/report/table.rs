use crate::analysis::Analysis;
use crate::analysis::aggregator::WasteFrequency;
use crate::analysis::guidance::Guidance;
use crate::analysis::ranking::PriorityEntry;
use crate::error::AppError;
use polars::prelude::{AnyValue, DataFrame};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Blank,
    Number(f64),
    Text(String),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Blank => Ok(()),
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

impl From<AnyValue<'_>> for Cell {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Cell::Blank,
            AnyValue::String(text) => Cell::text(text),
            AnyValue::StringOwned(text) => Cell::text(text.as_str()),
            AnyValue::Boolean(flag) => Cell::text(flag.to_string()),
            other => match other.extract::<f64>() {
                Some(number) if number.is_nan() => Cell::Blank,
                Some(number) => Cell::Number(number),
                None => Cell::Text(other.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest rendered value per column, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.to_string().chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

pub fn analyzed_data(frame: &DataFrame) -> Result<Table, AppError> {
    let columns = frame.get_columns();
    let mut table = Table {
        headers: columns.iter().map(|c| c.name().to_string()).collect(),
        rows: Vec::with_capacity(frame.height()),
    };
    for row in 0..frame.height() {
        let cells = columns
            .iter()
            .map(|column| column.get(row).map(Cell::from))
            .collect::<Result<Vec<_>, _>>()?;
        table.rows.push(cells);
    }
    Ok(table)
}

pub fn waste_summary(frequencies: &[WasteFrequency]) -> Table {
    let mut table = Table::new(&["Waste_Type", "Frequency"]);
    table.rows = frequencies
        .iter()
        .map(|entry| {
            vec![
                Cell::text(entry.category.tag()),
                Cell::Number(entry.frequency as f64),
            ]
        })
        .collect();
    table
}

pub fn priority_ranking(priorities: &[PriorityEntry]) -> Table {
    let mut table = Table::new(&[
        "Waste_Type",
        "Frequency",
        "Time_Impact",
        "Urgency",
        "Priority_Score",
    ]);
    table.rows = priorities
        .iter()
        .map(|entry| {
            vec![
                Cell::text(entry.category.tag()),
                Cell::Number(entry.frequency as f64),
                Cell::Number(entry.time_impact),
                Cell::text(entry.urgency.label()),
                Cell::Number(entry.priority_score),
            ]
        })
        .collect();
    table
}

pub fn lean_solutions(guidance: &[Guidance]) -> Table {
    let mut table = Table::new(&[
        "Waste_Type",
        "Immediate-Action",
        "RootCause-Tools",
        "LongTerm-Improvements",
    ]);
    table.rows = guidance
        .iter()
        .map(|entry| {
            vec![
                Cell::text(entry.category.tag()),
                Cell::text(entry.immediate_action),
                Cell::text(entry.root_cause_tools),
                Cell::text(entry.long_term_improvements),
            ]
        })
        .collect();
    table
}

/// All four report tables, in sheet order.
#[derive(Debug, Clone)]
pub struct ReportTables {
    pub analyzed: Table,
    pub summary: Table,
    pub priority: Table,
    pub solutions: Table,
}

impl ReportTables {
    pub fn from_analysis(analysis: &Analysis) -> Result<Self, AppError> {
        Ok(Self {
            analyzed: analyzed_data(&analysis.annotated.to_frame()?)?,
            summary: waste_summary(analysis.outcome().frequencies()),
            priority: priority_ranking(&analysis.priorities),
            solutions: lean_solutions(&analysis.guidance),
        })
    }
}
