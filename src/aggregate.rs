use crate::filter::{ScoreRange, Selection};
use crate::types::{
    BandCount, Department, DimensionScore, Employee, GroupSummary, HistogramBin, Metric,
    PerformanceBand, Project, RankedEmployee, Role, ScatterPoint, SummaryCards, TrendPoint,
};
use crate::util::{average, min_max, round1};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Categorical column a summary can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Department,
    Role,
    Project,
    PerformanceLevel,
}

impl GroupKey {
    // (ordinal, label) pairs the record belongs to. Ordinals follow the
    // enumeration order so summaries come out in a stable, meaningful order.
    fn keys_of(self, e: &Employee) -> Vec<(usize, &'static str)> {
        match self {
            GroupKey::Department => vec![(e.department as usize, e.department.label())],
            GroupKey::Role => vec![(e.role as usize, e.role.label())],
            GroupKey::Project => e.projects.iter().map(|p| (*p as usize, p.label())).collect(),
            GroupKey::PerformanceLevel => vec![(
                e.performance_level as usize,
                e.performance_level.label(),
            )],
        }
    }

    pub fn domain(self) -> Vec<&'static str> {
        match self {
            GroupKey::Department => Department::ALL.iter().map(|d| d.label()).collect(),
            GroupKey::Role => Role::ALL.iter().map(|r| r.label()).collect(),
            GroupKey::Project => Project::ALL.iter().map(|p| p.label()).collect(),
            GroupKey::PerformanceLevel => PerformanceBand::ALL.iter().map(|b| b.label()).collect(),
        }
    }
}

/// Per-group counts, means, and counter totals. Groups without members in
/// `view` are left out rather than reported as zero rows.
pub fn group_summaries(view: &[&Employee], key: GroupKey) -> Vec<GroupSummary> {
    #[derive(Default)]
    struct Acc {
        label: &'static str,
        kpi: Vec<f64>,
        completion: Vec<f64>,
        on_time: Vec<f64>,
        productivity: Vec<f64>,
        quality: Vec<f64>,
        collaboration: Vec<f64>,
        assigned: u64,
        completed: u64,
        overdue: u64,
    }

    let mut map: BTreeMap<usize, Acc> = BTreeMap::new();
    for e in view {
        for (ordinal, label) in key.keys_of(e) {
            let acc = map.entry(ordinal).or_insert_with(|| Acc {
                label,
                ..Acc::default()
            });
            acc.kpi.push(e.overall_kpi);
            acc.completion.push(e.completion_rate);
            acc.on_time.push(e.on_time_rate);
            acc.productivity.push(e.productivity_score);
            acc.quality.push(e.avg_task_quality);
            acc.collaboration.push(e.collaboration_score);
            acc.assigned += e.tasks_assigned as u64;
            acc.completed += e.tasks_completed as u64;
            acc.overdue += e.tasks_overdue as u64;
        }
    }

    map.into_values()
        .map(|acc| GroupSummary {
            key: acc.label.to_string(),
            count: acc.kpi.len(),
            avg_overall_kpi: round1(average(&acc.kpi)),
            avg_completion_rate: round1(average(&acc.completion)),
            avg_on_time_rate: round1(average(&acc.on_time)),
            avg_productivity_score: round1(average(&acc.productivity)),
            avg_task_quality: round1(average(&acc.quality)),
            avg_collaboration_score: round1(average(&acc.collaboration)),
            total_tasks_assigned: acc.assigned,
            total_tasks_completed: acc.completed,
            total_tasks_overdue: acc.overdue,
        })
        .collect()
}

/// The `n` highest records by `metric`, best first. Equal values keep view order.
pub fn top_n<'a>(view: &[&'a Employee], metric: Metric, n: usize) -> Vec<&'a Employee> {
    let mut ranked = view.to_vec();
    ranked.sort_by(|a, b| {
        metric
            .value(b)
            .partial_cmp(&metric.value(a))
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

pub fn ranking(view: &[&Employee], metric: Metric, n: usize) -> Vec<RankedEmployee> {
    top_n(view, metric, n)
        .into_iter()
        .enumerate()
        .map(|(idx, e)| RankedEmployee {
            rank: idx + 1,
            name: e.name.clone(),
            department: e.department,
            value: metric.value(e),
            overall_kpi: e.overall_kpi,
        })
        .collect()
}

/// Mean of `metric` over the view; 0.0 when the view is empty.
pub fn mean(view: &[&Employee], metric: Metric) -> f64 {
    average(&view.iter().map(|e| metric.value(e)).collect::<Vec<_>>())
}

pub fn summary_cards(view: &[&Employee]) -> SummaryCards {
    SummaryCards {
        employees: view.len(),
        avg_overall_kpi: round1(mean(view, Metric::OverallKpi)),
        avg_completion_rate: round1(mean(view, Metric::CompletionRate)),
        avg_on_time_rate: round1(mean(view, Metric::OnTimeRate)),
        avg_productivity_score: round1(mean(view, Metric::ProductivityScore)),
    }
}

/// Members per performance level, worst to best, zero counts omitted.
pub fn band_counts(view: &[&Employee]) -> Vec<BandCount> {
    PerformanceBand::ALL
        .iter()
        .map(|level| BandCount {
            level: *level,
            count: view.iter().filter(|e| e.performance_level == *level).count(),
        })
        .filter(|bc| bc.count > 0)
        .collect()
}

/// Equal-width bins spanning the view's range of `metric`. The maximum value
/// is counted in the last bin; a zero-width range collapses to one bin.
pub fn histogram(view: &[&Employee], metric: Metric, bins: usize) -> Vec<HistogramBin> {
    let Some((lo, hi)) = min_max(view.iter().map(|e| metric.value(e))) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let width = (hi - lo) / bins as f64;
    if width <= 0.0 {
        return vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: view.len(),
        }];
    }

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();
    for e in view {
        let idx = (((metric.value(e) - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

pub fn scatter_points(view: &[&Employee]) -> Vec<ScatterPoint> {
    view.iter()
        .map(|e| ScatterPoint {
            name: e.name.clone(),
            department: e.department,
            completion_rate: e.completion_rate,
            productivity_score: e.productivity_score,
            tasks_assigned: e.tasks_assigned,
            on_time_rate: e.on_time_rate,
            avg_task_quality: e.avg_task_quality,
            overall_kpi: e.overall_kpi,
        })
        .collect()
}

/// Mean score on each radar axis; all zero for an empty view.
pub fn dimension_profile(view: &[&Employee]) -> Vec<DimensionScore> {
    [
        ("Productivity", Metric::ProductivityScore),
        ("Completion", Metric::CompletionRate),
        ("On-Time", Metric::OnTimeRate),
        ("Quality", Metric::AvgTaskQuality),
        ("Collaboration", Metric::CollaborationScore),
    ]
    .into_iter()
    .map(|(dimension, metric)| DimensionScore {
        dimension,
        value: round1(mean(view, metric)),
    })
    .collect()
}

/// Trend points for the selected departments; other selectors do not apply.
pub fn trend_for<'a>(
    trend: &'a [TrendPoint],
    departments: &Selection<Department>,
) -> Vec<&'a TrendPoint> {
    trend
        .iter()
        .filter(|p| departments.contains(&p.department))
        .collect()
}

/// Default KPI range covering the whole table: `[floor(min), ceil(max)]`.
pub fn kpi_bounds(employees: &[Employee]) -> ScoreRange {
    match min_max(employees.iter().map(|e| e.overall_kpi)) {
        Some((lo, hi)) => ScoreRange::new(lo.floor(), hi.ceil()),
        None => ScoreRange::FULL,
    }
}
