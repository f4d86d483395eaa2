// The data behind every dashboard widget for one filter state.
//
// Nothing here draws anything. A renderer (the console view in `main`, or
// anything that reads the JSON) consumes `DashboardView` as plain data.
use crate::aggregate::{self, GroupKey};
use crate::filter::FilterSet;
use crate::types::{
    BandCount, Dataset, DimensionScore, Employee, EmployeeRow, GroupSummary, GroupSummaryRow,
    HistogramBin, Metric, RankedEmployee, RankingRow, ScatterPoint, SummaryCards, TrendPoint,
};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

pub const HISTOGRAM_BINS: usize = 15;
pub const DRILL_DOWN_SIZE: usize = 10;
pub const NO_MATCH_MESSAGE: &str = "No employees match the selected filters.";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filters: FilterSet,
    pub drill_down_metric: Metric,
    pub cards: SummaryCards,
    pub band_breakdown: Vec<BandCount>,
    pub kpi_histogram: Vec<HistogramBin>,
    pub department_summary: Vec<GroupSummary>,
    pub project_summary: Vec<GroupSummary>,
    pub scatter: Vec<ScatterPoint>,
    pub trend: Vec<TrendPoint>,
    pub drill_down: Vec<RankedEmployee>,
    pub radar: Vec<DimensionScore>,
    pub table: Vec<EmployeeRow>,
}

impl DashboardView {
    pub fn build(dataset: &Dataset, filters: &FilterSet, metric: Metric) -> Self {
        let view = filters.apply(&dataset.employees);
        debug!(
            matched = view.len(),
            total = dataset.employees.len(),
            metric = metric.column(),
            "applied filters"
        );

        Self {
            filters: filters.clone(),
            drill_down_metric: metric,
            cards: aggregate::summary_cards(&view),
            band_breakdown: aggregate::band_counts(&view),
            kpi_histogram: aggregate::histogram(&view, Metric::OverallKpi, HISTOGRAM_BINS),
            department_summary: aggregate::group_summaries(&view, GroupKey::Department),
            project_summary: aggregate::group_summaries(&view, GroupKey::Project),
            scatter: aggregate::scatter_points(&view),
            trend: aggregate::trend_for(&dataset.trend, &filters.departments)
                .into_iter()
                .cloned()
                .collect(),
            drill_down: aggregate::ranking(&view, metric, DRILL_DOWN_SIZE),
            radar: aggregate::dimension_profile(&view),
            table: detail_rows(&view),
        }
    }

    pub fn row_count(&self) -> usize {
        self.cards.employees
    }

    /// True when no record survived the filters; renderers should show
    /// [`NO_MATCH_MESSAGE`] instead of empty charts.
    pub fn is_empty(&self) -> bool {
        self.cards.employees == 0
    }
}

/// Display/export rows for the view, highest Overall KPI first.
pub fn detail_rows(view: &[&Employee]) -> Vec<EmployeeRow> {
    let mut sorted = view.to_vec();
    sorted.sort_by(|a, b| {
        b.overall_kpi
            .partial_cmp(&a.overall_kpi)
            .unwrap_or(Ordering::Equal)
    });
    sorted.into_iter().map(employee_row).collect()
}

pub fn employee_row(e: &Employee) -> EmployeeRow {
    EmployeeRow {
        id: e.id.clone(),
        name: e.name.clone(),
        department: e.department.label().to_string(),
        role: e.role.label().to_string(),
        tasks_assigned: e.tasks_assigned,
        tasks_completed: e.tasks_completed,
        completion_rate: format_number(e.completion_rate, 1),
        productivity_score: format_number(e.productivity_score, 1),
        on_time_rate: format_number(e.on_time_rate, 1),
        avg_task_quality: format_number(e.avg_task_quality, 1),
        overall_kpi: format_number(e.overall_kpi, 1),
        performance_level: e.performance_level.label().to_string(),
    }
}

pub fn group_rows(groups: &[GroupSummary]) -> Vec<GroupSummaryRow> {
    groups
        .iter()
        .map(|g| GroupSummaryRow {
            key: g.key.clone(),
            count: g.count,
            avg_overall_kpi: format_number(g.avg_overall_kpi, 1),
            avg_completion_rate: format_number(g.avg_completion_rate, 1),
            avg_on_time_rate: format_number(g.avg_on_time_rate, 1),
            avg_productivity_score: format_number(g.avg_productivity_score, 1),
            total_tasks_assigned: format_int(g.total_tasks_assigned),
            total_tasks_overdue: format_int(g.total_tasks_overdue),
        })
        .collect()
}

pub fn ranking_rows(ranked: &[RankedEmployee]) -> Vec<RankingRow> {
    ranked
        .iter()
        .map(|r| RankingRow {
            rank: r.rank,
            name: r.name.clone(),
            department: r.department.label().to_string(),
            value: format_number(r.value, 1),
            overall_kpi: format_number(r.overall_kpi, 1),
        })
        .collect()
}
