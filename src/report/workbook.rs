use crate::dataset::STATUS_COLUMN;
use crate::error::AppError;
use crate::report::table::{Cell, ReportTables, Table};
use crate::standards::WasteCategory;
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartPoint, ChartSolidFill, ChartType, Format, FormatAlign,
    FormatBorder, Workbook, Worksheet,
};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_REPORT_PATH: &str = "Lean_Waste_Analysis_Report.xlsx";

const MAX_COLUMN_WIDTH: usize = 45;
const WRAP_THRESHOLD_CHARS: usize = 25;
const FALLBACK_SLICE_COLOR: &str = "#D9D9D9";
const SUMMARY_SHEET: &str = "Waste_Summary";

struct SheetFormats {
    header: Format,
    normal: Format,
    wrap: Format,
    critical: Format,
    waste: Format,
    ok: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let centered = || {
            Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
        };
        Self {
            header: centered()
                .set_bold()
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color("#BDD7EE")
                .set_text_wrap(),
            normal: centered().set_align(FormatAlign::VerticalCenter),
            wrap: Format::new()
                .set_border(FormatBorder::Thin)
                .set_text_wrap()
                .set_align(FormatAlign::Top),
            critical: centered().set_background_color("#F8CBAD"),
            waste: centered().set_background_color("#FFE699"),
            ok: centered().set_background_color("#C6E0B4"),
        }
    }

    fn highlight(&self, text: &str) -> &Format {
        if text.contains("CRITICAL") {
            &self.critical
        } else if text.contains("WASTE") {
            &self.waste
        } else if text.contains("OPTIMAL") {
            &self.ok
        } else {
            &self.normal
        }
    }
}

/// Write the full report. The chart sheet is left out when `tables.summary`
/// is empty.
pub fn write_report(tables: &ReportTables, path: impl AsRef<Path>) -> Result<(), AppError> {
    let path = path.as_ref();
    let formats = SheetFormats::new();
    let mut workbook = Workbook::new();

    let sheets = [
        ("Analyzed_Data", &tables.analyzed, Some(STATUS_COLUMN)),
        (SUMMARY_SHEET, &tables.summary, None),
        ("Waste_Priority", &tables.priority, Some("Urgency")),
        ("Lean_Solutions", &tables.solutions, None),
    ];
    for (name, table, highlight) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_table(worksheet, table, highlight, &formats)?;
        debug!(sheet = name, rows = table.rows.len(), "Sheet written");
    }

    if tables.summary.is_empty() {
        info!("Chart skipped - no waste detected");
    } else {
        let chart = distribution_chart(&tables.summary);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Charts")?;
        worksheet.insert_chart(1, 1, &chart)?;
    }

    workbook.save(path)?;
    info!(path = %path.display(), "Excel report generated");
    Ok(())
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    highlight_column: Option<&str>,
    formats: &SheetFormats,
) -> Result<(), AppError> {
    let highlight = highlight_column.and_then(|name| table.column_index(name));

    for (col, (header, width)) in table.headers.iter().zip(table.column_widths()).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, (width + 3).min(MAX_COLUMN_WIDTH) as f64)?;
        worksheet.write_string_with_format(0, col, header, &formats.header)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let highlighted = highlight == Some(col);
            let col = col as u16;
            match cell {
                Cell::Blank => {
                    worksheet.write_blank(row_num, col, &formats.normal)?;
                }
                Cell::Number(value) => {
                    let format = if highlighted {
                        formats.highlight(&value.to_string())
                    } else {
                        &formats.normal
                    };
                    worksheet.write_number_with_format(row_num, col, *value, format)?;
                }
                Cell::Text(text) => {
                    let format = if highlighted {
                        formats.highlight(text)
                    } else if text.chars().count() > WRAP_THRESHOLD_CHARS {
                        &formats.wrap
                    } else {
                        &formats.normal
                    };
                    worksheet.write_string_with_format(row_num, col, text, format)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    if !table.headers.is_empty() {
        let last_col = table.headers.len() as u16 - 1;
        worksheet.autofilter(0, 0, table.rows.len() as u32, last_col)?;
    }
    Ok(())
}

fn slice_color(tag: &str) -> &'static str {
    WasteCategory::ALL
        .iter()
        .find(|category| category.tag() == tag)
        .map(|category| category.chart_color())
        .unwrap_or(FALLBACK_SLICE_COLOR)
}

fn distribution_chart(summary: &Table) -> Chart {
    let last_row = summary.rows.len() as u32;
    let points: Vec<ChartPoint> = summary
        .rows
        .iter()
        .map(|row| {
            let tag = match row.first() {
                Some(Cell::Text(tag)) => tag.as_str(),
                _ => "",
            };
            ChartPoint::new().set_format(ChartSolidFill::new().set_color(slice_color(tag)))
        })
        .collect();

    let mut data_label = ChartDataLabel::new();
    data_label.show_percentage();

    let mut chart = Chart::new(ChartType::Pie);
    chart
        .add_series()
        .set_categories((SUMMARY_SHEET, 1, 0, last_row, 0))
        .set_values((SUMMARY_SHEET, 1, 1, last_row, 1))
        .set_data_label(&data_label)
        .set_points(&points);
    chart.title().set_name("Categorized Waste Distribution");
    // 1.5x the default 480x288 chart.
    chart.set_width(720).set_height(432);
    chart
}
