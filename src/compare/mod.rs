//! Scenario comparison view configuration
//!
//! Chart layouts, colours and selection options the comparison UI renders
//! TR-55 and GWLF-E model results with.

mod constants;

pub use constants::*;

use serde::Serialize;

/// Colour for the scenario at `index`, cycling through the palette
pub fn scenario_color(index: usize) -> &'static str {
    SCENARIO_COLORS[index % SCENARIO_COLORS.len()]
}

/// Month label for a zero-based month index
pub fn month_name(month: usize) -> Option<&'static str> {
    MONTH_NAMES.get(month).copied()
}

/// Option selected by default in a selection list
pub fn default_option(options: &[SelectionOption]) -> Option<&SelectionOption> {
    options.iter().find(|o| o.active)
}

/// Every comparison table, as the UI consumes them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareConfig {
    pub scenario_colors: &'static [&'static str],
    pub month_names: &'static [&'static str],
    pub tr55_runoff_chart_config: &'static [ChartConfig],
    pub tr55_quality_chart_config: &'static [ChartConfig],
    pub gwlfe_hydrology_selection_option_config: &'static [SelectionOption],
    pub gwlfe_quality_chart_config: &'static [QualityChartConfig],
    pub gwlfe_quality_selection_option_config: &'static [SelectionOption],
    pub min_visible_scenarios: usize,
    pub chart_axis_width: u32,
    pub compare_column_width: u32,
}

impl CompareConfig {
    pub fn new() -> Self {
        Self {
            scenario_colors: &SCENARIO_COLORS,
            month_names: &MONTH_NAMES,
            tr55_runoff_chart_config: &TR55_RUNOFF_CHART_CONFIG,
            tr55_quality_chart_config: &TR55_QUALITY_CHART_CONFIG,
            gwlfe_hydrology_selection_option_config: &GWLFE_HYDROLOGY_SELECTION_OPTION_CONFIG,
            gwlfe_quality_chart_config: &GWLFE_QUALITY_CHART_CONFIG,
            gwlfe_quality_selection_option_config: &GWLFE_QUALITY_SELECTION_OPTION_CONFIG,
            min_visible_scenarios: MIN_VISIBLE_SCENARIOS,
            chart_axis_width: CHART_AXIS_WIDTH,
            compare_column_width: COMPARE_COLUMN_WIDTH,
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new()
    }
}
