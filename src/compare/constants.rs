//! Static configuration tables for the scenario comparison view

use serde::Serialize;

pub const CHARTS: &str = "charts";
pub const TABLE: &str = "table";
pub const MIN_VISIBLE_SCENARIOS: usize = 5;
pub const CHART_AXIS_WIDTH: u32 = 82;
pub const COMPARE_COLUMN_WIDTH: u32 = 134;
pub const HYDROLOGY: &str = "Hydrology";

pub const SCENARIO_COLORS: [&str; 32] = [
    "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099", "#0099c6", "#dd4477", "#66aa00",
    "#b82e2e", "#316395", "#3366cc", "#994499", "#22aa99", "#aaaa11", "#6633cc", "#e67300",
    "#8b0707", "#651067", "#329262", "#5574a6", "#3b3eac", "#b77322", "#16d620", "#b91383",
    "#f4359e", "#9c5935", "#a9c413", "#2a778d", "#668d1c", "#bea413", "#0c5922", "#743411",
];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// GWLF-E hydrology output keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HydrologyKey {
    #[serde(rename = "AvStreamFlow")]
    StreamFlow,
    #[serde(rename = "AvRunoff")]
    SurfaceRunoff,
    #[serde(rename = "AvGroundWater")]
    SubsurfaceFlow,
    #[serde(rename = "AvPtSrcFlow")]
    PointSourceFlow,
    #[serde(rename = "AvEvapoTrans")]
    Evapotranspiration,
    #[serde(rename = "AvPrecipitation")]
    Precipitation,
}

impl HydrologyKey {
    pub const ALL: [HydrologyKey; 6] = [
        HydrologyKey::StreamFlow,
        HydrologyKey::SurfaceRunoff,
        HydrologyKey::SubsurfaceFlow,
        HydrologyKey::PointSourceFlow,
        HydrologyKey::Evapotranspiration,
        HydrologyKey::Precipitation,
    ];

    /// Field name in model output
    pub fn as_str(&self) -> &'static str {
        match self {
            HydrologyKey::StreamFlow => "AvStreamFlow",
            HydrologyKey::SurfaceRunoff => "AvRunoff",
            HydrologyKey::SubsurfaceFlow => "AvGroundWater",
            HydrologyKey::PointSourceFlow => "AvPtSrcFlow",
            HydrologyKey::Evapotranspiration => "AvEvapoTrans",
            HydrologyKey::Precipitation => "AvPrecipitation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    pub name: &'static str,
    pub badge_id: &'static str,
}

/// A TR-55 chart on the comparison view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'static str>,
    pub name: &'static str,
    pub chart_div: &'static str,
    pub series_colors: &'static [&'static str],
    pub legend_items: Option<&'static [LegendItem]>,
    pub unit: &'static str,
    pub unit_label: &'static str,
}

/// A GWLF-E quality chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityChartConfig {
    pub name: &'static str,
    pub key: &'static str,
    pub chart_div: &'static str,
    pub unit: &'static str,
}

/// An entry of a grouped selection dropdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'static str>,
    pub group_name: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<HydrologyKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
}

const COMBINED_LEGEND: [LegendItem; 3] = [
    LegendItem {
        name: "Evapotranspiration",
        badge_id: "evapotranspiration-badge",
    },
    LegendItem {
        name: "Runoff",
        badge_id: "runoff-badge",
    },
    LegendItem {
        name: "Infiltration",
        badge_id: "infiltration-badge",
    },
];

pub const TR55_RUNOFF_CHART_CONFIG: [ChartConfig; 4] = [
    ChartConfig {
        key: Some("combined"),
        name: "Combined Hydrology",
        chart_div: "combined-hydrology-chart",
        series_colors: &["#F8AA00", "#CF4300", "#C2D33C"],
        legend_items: Some(&COMBINED_LEGEND),
        unit: "cm",
        unit_label: "Level",
    },
    ChartConfig {
        key: Some("et"),
        name: "Evapotranspiration",
        chart_div: "evapotranspiration-chart",
        series_colors: &["#C2D33C"],
        legend_items: None,
        unit: "cm",
        unit_label: "Level",
    },
    ChartConfig {
        key: Some("runoff"),
        name: "Runoff",
        chart_div: "runoff-chart",
        series_colors: &["#CF4300"],
        legend_items: None,
        unit: "cm",
        unit_label: "Level",
    },
    ChartConfig {
        key: Some("inf"),
        name: "Infiltration",
        chart_div: "infiltration-chart",
        series_colors: &["#F8AA00"],
        legend_items: None,
        unit: "cm",
        unit_label: "Level",
    },
];

const fn quality_chart(name: &'static str, chart_div: &'static str) -> ChartConfig {
    ChartConfig {
        key: None,
        name,
        chart_div,
        series_colors: &["#389b9b"],
        legend_items: None,
        unit: "kg/ha",
        unit_label: "Loading Rate",
    }
}

pub const TR55_QUALITY_CHART_CONFIG: [ChartConfig; 3] = [
    quality_chart("Total Suspended Solids", "tss-chart"),
    quality_chart("Total Nitrogen", "tn-chart"),
    quality_chart("Total Phosphorus", "tp-chart"),
];

const fn hydrology_option(
    name: &'static str,
    value: HydrologyKey,
    active: bool,
) -> SelectionOption {
    SelectionOption {
        group: None,
        group_name: "Water Flow",
        name,
        value: Some(value),
        unit: None,
        active,
    }
}

pub const GWLFE_HYDROLOGY_SELECTION_OPTION_CONFIG: [SelectionOption; 6] = [
    hydrology_option("Stream Flow", HydrologyKey::StreamFlow, true),
    hydrology_option("Surface Runoff", HydrologyKey::SurfaceRunoff, false),
    hydrology_option("Subsurface Flow", HydrologyKey::SubsurfaceFlow, false),
    hydrology_option("Point Source Flow", HydrologyKey::PointSourceFlow, false),
    hydrology_option("Evapotranspiration", HydrologyKey::Evapotranspiration, false),
    hydrology_option("Precipitation", HydrologyKey::Precipitation, false),
];

pub const GWLFE_QUALITY_CHART_CONFIG: [QualityChartConfig; 3] = [
    QualityChartConfig {
        name: "Sediment",
        key: "Sediment",
        chart_div: "s-chart",
        unit: "kg",
    },
    QualityChartConfig {
        name: "Total Nitrogen",
        key: "TotalN",
        chart_div: "tn-chart",
        unit: "kg",
    },
    QualityChartConfig {
        name: "Total Phosphorus",
        key: "TotalP",
        chart_div: "tp-chart",
        unit: "kg",
    },
];

const fn summary_option(name: &'static str, unit: &'static str, active: bool) -> SelectionOption {
    SelectionOption {
        group: Some("SummaryLoads"),
        group_name: "Summary",
        name,
        value: None,
        unit: Some(unit),
        active,
    }
}

const fn land_use_option(name: &'static str) -> SelectionOption {
    SelectionOption {
        group: Some("Loads"),
        group_name: "Land Use",
        name,
        value: None,
        unit: Some("kg"),
        active: false,
    }
}

pub const GWLFE_QUALITY_SELECTION_OPTION_CONFIG: [SelectionOption; 19] = [
    summary_option("Total Loads", "kg", true),
    summary_option("Loading Rates", "kg/ha", false),
    summary_option("Mean Annual Concentration", "mg/l", false),
    summary_option("Mean Low-Flow Concentration", "mg/l", false),
    land_use_option("Hay/Pasture"),
    land_use_option("Cropland"),
    land_use_option("Wooded Areas"),
    land_use_option("Wetlands"),
    land_use_option("Open Land"),
    land_use_option("Barren Areas"),
    land_use_option("Low-Density Mixed"),
    land_use_option("Medium-Density Mixed"),
    land_use_option("High-Density Mixed"),
    land_use_option("Low-Density Open Space"),
    land_use_option("Farm Animals"),
    land_use_option("Stream Bank Erosion"),
    land_use_option("Subsurface Flow"),
    land_use_option("Point Sources"),
    land_use_option("Septic Systems"),
];
