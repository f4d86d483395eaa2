use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

/// Returned when a label does not name a member of a fixed domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {domain} '{value}' (expected one of: {expected})")]
pub struct UnknownLabel {
    pub domain: &'static str,
    pub value: String,
    pub expected: String,
}

// Labels are matched case-insensitively and with `-`/`_` standing in for
// spaces, so `needs-improvement` selects "Needs Improvement" on the CLI.
fn parse_label<T: Copy>(
    domain: &'static str,
    value: &str,
    all: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, UnknownLabel> {
    let wanted = value.trim().replace(['-', '_'], " ");
    all.iter()
        .copied()
        .find(|item| label(*item).eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| UnknownLabel {
            domain,
            value: value.to_string(),
            expected: all
                .iter()
                .map(|item| label(*item))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    #[serde(rename = "HR")]
    Hr,
    Product,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Engineering,
        Department::Marketing,
        Department::Sales,
        Department::Hr,
        Department::Product,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Hr => "HR",
            Department::Product => "Product",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("department", s, &Self::ALL, Self::label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Role {
    Senior,
    Mid,
    Junior,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Senior, Role::Mid, Role::Junior];

    pub fn label(self) -> &'static str {
        match self {
            Role::Senior => "Senior",
            Role::Mid => "Mid",
            Role::Junior => "Junior",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("role", s, &Self::ALL, Self::label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Project {
    Atlas,
    Beacon,
    Comet,
    Delta,
    Echo,
}

impl Project {
    pub const ALL: [Project; 5] = [
        Project::Atlas,
        Project::Beacon,
        Project::Comet,
        Project::Delta,
        Project::Echo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Project::Atlas => "Atlas",
            Project::Beacon => "Beacon",
            Project::Comet => "Comet",
            Project::Delta => "Delta",
            Project::Echo => "Echo",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Project {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("project", s, &Self::ALL, Self::label)
    }
}

/// Discrete performance level derived from the Overall KPI, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PerformanceBand {
    Critical,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Good,
    Excellent,
    Outstanding,
}

impl PerformanceBand {
    pub const ALL: [PerformanceBand; 5] = [
        PerformanceBand::Critical,
        PerformanceBand::NeedsImprovement,
        PerformanceBand::Good,
        PerformanceBand::Excellent,
        PerformanceBand::Outstanding,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PerformanceBand::Critical => "Critical",
            PerformanceBand::NeedsImprovement => "Needs Improvement",
            PerformanceBand::Good => "Good",
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::Outstanding => "Outstanding",
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PerformanceBand {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("performance level", s, &Self::ALL, Self::label)
    }
}

/// Numeric columns that can drive a drill-down, ranking, or histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    ProductivityScore,
    CompletionRate,
    OnTimeRate,
    AvgTaskQuality,
    CollaborationScore,
    InitiativeScore,
    OverallKpi,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::ProductivityScore,
        Metric::CompletionRate,
        Metric::OnTimeRate,
        Metric::AvgTaskQuality,
        Metric::CollaborationScore,
        Metric::InitiativeScore,
        Metric::OverallKpi,
    ];

    /// Export/display column name.
    pub fn column(self) -> &'static str {
        match self {
            Metric::ProductivityScore => "Productivity_Score",
            Metric::CompletionRate => "Completion_Rate",
            Metric::OnTimeRate => "On_Time_Rate",
            Metric::AvgTaskQuality => "Avg_Task_Quality",
            Metric::CollaborationScore => "Collaboration_Score",
            Metric::InitiativeScore => "Initiative_Score",
            Metric::OverallKpi => "Overall_KPI",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::ProductivityScore => "Productivity Score",
            Metric::CompletionRate => "Completion Rate",
            Metric::OnTimeRate => "On Time Rate",
            Metric::AvgTaskQuality => "Avg Task Quality",
            Metric::CollaborationScore => "Collaboration Score",
            Metric::InitiativeScore => "Initiative Score",
            Metric::OverallKpi => "Overall KPI",
        }
    }

    pub fn value(self, employee: &Employee) -> f64 {
        match self {
            Metric::ProductivityScore => employee.productivity_score,
            Metric::CompletionRate => employee.completion_rate,
            Metric::OnTimeRate => employee.on_time_rate,
            Metric::AvgTaskQuality => employee.avg_task_quality,
            Metric::CollaborationScore => employee.collaboration_score,
            Metric::InitiativeScore => employee.initiative_score,
            Metric::OverallKpi => employee.overall_kpi,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `Completion_Rate` and `completion-rate` both normalize to the label.
        parse_label("metric", s, &Self::ALL, Self::label)
    }
}

/// Base attributes as drawn by the generator, before any derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRecord {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub role: Role,
    pub projects: Vec<Project>,
    pub tasks_assigned: u32,
    pub tasks_completed: u32,
    pub tasks_overdue: u32,
    pub avg_task_quality: f64,
    pub on_time_rate: f64,
    pub productivity_score: f64,
    pub collaboration_score: f64,
    pub initiative_score: f64,
    pub self_assessment: f64,
}

/// One row of the canonical table: base attributes plus derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub role: Role,
    pub projects: Vec<Project>,
    pub tasks_assigned: u32,
    pub tasks_completed: u32,
    pub tasks_overdue: u32,
    pub avg_task_quality: f64,
    pub on_time_rate: f64,
    pub productivity_score: f64,
    pub collaboration_score: f64,
    pub initiative_score: f64,
    pub self_assessment: f64,
    pub completion_rate: f64,
    pub overall_kpi: f64,
    pub performance_level: PerformanceBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub department: Department,
    pub score: u32,
}

/// Generated table plus the monthly trend series; immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub employees: Vec<Employee>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub avg_overall_kpi: f64,
    pub avg_completion_rate: f64,
    pub avg_on_time_rate: f64,
    pub avg_productivity_score: f64,
    pub avg_task_quality: f64,
    pub avg_collaboration_score: f64,
    pub total_tasks_assigned: u64,
    pub total_tasks_completed: u64,
    pub total_tasks_overdue: u64,
}

/// Scalar cards shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub employees: usize,
    pub avg_overall_kpi: f64,
    pub avg_completion_rate: f64,
    pub avg_on_time_rate: f64,
    pub avg_productivity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub level: PerformanceBand,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub department: Department,
    pub completion_rate: f64,
    pub productivity_score: f64,
    pub tasks_assigned: u32,
    pub on_time_rate: f64,
    pub avg_task_quality: f64,
    pub overall_kpi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEmployee {
    pub rank: usize,
    pub name: String,
    pub department: Department,
    pub value: f64,
    pub overall_kpi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: &'static str,
    pub value: f64,
}

/// Display/export row. Column names match the downloadable CSV header.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct EmployeeRow {
    #[serde(rename = "ID")]
    #[tabled(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    #[tabled(rename = "Department")]
    pub department: String,
    #[serde(rename = "Role")]
    #[tabled(rename = "Role")]
    pub role: String,
    #[serde(rename = "Tasks_Assigned")]
    #[tabled(rename = "Tasks_Assigned")]
    pub tasks_assigned: u32,
    #[serde(rename = "Tasks_Completed")]
    #[tabled(rename = "Tasks_Completed")]
    pub tasks_completed: u32,
    #[serde(rename = "Completion_Rate")]
    #[tabled(rename = "Completion_Rate")]
    pub completion_rate: String,
    #[serde(rename = "Productivity_Score")]
    #[tabled(rename = "Productivity_Score")]
    pub productivity_score: String,
    #[serde(rename = "On_Time_Rate")]
    #[tabled(rename = "On_Time_Rate")]
    pub on_time_rate: String,
    #[serde(rename = "Avg_Task_Quality")]
    #[tabled(rename = "Avg_Task_Quality")]
    pub avg_task_quality: String,
    #[serde(rename = "Overall_KPI")]
    #[tabled(rename = "Overall_KPI")]
    pub overall_kpi: String,
    #[serde(rename = "Performance_Level")]
    #[tabled(rename = "Performance_Level")]
    pub performance_level: String,
}

/// Console rendering of a [`GroupSummary`].
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GroupSummaryRow {
    #[tabled(rename = "Group")]
    pub key: String,
    #[tabled(rename = "Employees")]
    pub count: usize,
    #[tabled(rename = "AvgKPI")]
    pub avg_overall_kpi: String,
    #[tabled(rename = "AvgCompletion")]
    pub avg_completion_rate: String,
    #[tabled(rename = "AvgOnTime")]
    pub avg_on_time_rate: String,
    #[tabled(rename = "AvgProductivity")]
    pub avg_productivity_score: String,
    #[tabled(rename = "TotalTasks")]
    pub total_tasks_assigned: String,
    #[tabled(rename = "Overdue")]
    pub total_tasks_overdue: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RankingRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Overall_KPI")]
    pub overall_kpi: String,
}
