use crate::standards::WasteCategory;
use serde::Serialize;

/// Remediation guidance for one waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guidance {
    #[serde(rename = "Waste_Type")]
    pub category: WasteCategory,
    #[serde(rename = "Immediate-Action")]
    pub immediate_action: &'static str,
    #[serde(rename = "RootCause-Tools")]
    pub root_cause_tools: &'static str,
    #[serde(rename = "LongTerm-Improvements")]
    pub long_term_improvements: &'static str,
}

pub static LEAN_SOLUTIONS: [Guidance; 3] = [
    Guidance {
        category: WasteCategory::Waiting,
        immediate_action: "Visual job sequencing; Temporary workload balancing",
        root_cause_tools: "Time study; Bottleneck analysis",
        long_term_improvements: "Line balancing; Pull-based production",
    },
    Guidance {
        category: WasteCategory::Motion,
        immediate_action: "Reposition tools; Reduce unnecessary movement",
        root_cause_tools: "Motion study; Ergonomic assessment",
        long_term_improvements: "Layout redesign; 5S implementation",
    },
    Guidance {
        category: WasteCategory::Defects,
        immediate_action: "Segregate defective parts; Temporary inspection",
        root_cause_tools: "5-Why analysis; Fishbone diagram",
        long_term_improvements: "Poka-Yoke; SPC implementation",
    },
];

pub fn lookup(catalog: &'static [Guidance], category: WasteCategory) -> Option<&'static Guidance> {
    catalog.iter().find(|guidance| guidance.category == category)
}

/// Guidance rows for `categories`, skipping any the catalog does not cover.
pub fn guidance_table(
    catalog: &'static [Guidance],
    categories: &[WasteCategory],
) -> Vec<Guidance> {
    categories
        .iter()
        .filter_map(|category| lookup(catalog, *category))
        .copied()
        .collect()
}
