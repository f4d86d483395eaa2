// Conjunctive filtering over the employee table.
//
// A `FilterSet` holds one predicate per filterable field. A record passes
// only if every predicate accepts it; the result keeps table order.
use crate::types::{Department, Employee, PerformanceBand, Project, Role};
use serde::Serialize;
use std::collections::BTreeSet;

/// Set-membership predicate over a fixed domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selection<T: Ord> {
    /// The "All" sentinel; accepts every value.
    All,
    /// Accepts only listed values. An empty set accepts nothing.
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Ord + Copy> Selection<T> {
    pub fn only<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Selection::Only(values.into_iter().collect())
    }

    /// `All` when `values` is empty, otherwise `Only(values)`. This is how an
    /// unset selector arrives from the command line.
    pub fn from_choices(values: Vec<T>) -> Self {
        if values.is_empty() {
            Selection::All
        } else {
            Selection::only(values)
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }

    /// Accepts when any of `values` is selected; `All` also accepts none.
    pub fn contains_any(&self, values: &[T]) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => values.iter().any(|v| set.contains(v)),
        }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        match (self, other) {
            (Selection::All, s) | (s, Selection::All) => s.clone(),
            (Selection::Only(a), Selection::Only(b)) => {
                Selection::Only(a.intersection(b).copied().collect())
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Closed score interval; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub const FULL: ScoreRange = ScoreRange {
        low: 0.0,
        high: 100.0,
    };

    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Overlap of two ranges. Disjoint ranges produce an inverted range that
    /// contains nothing.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            low: self.low.max(other.low),
            high: self.high.min(other.high),
        }
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilterSet {
    pub departments: Selection<Department>,
    pub roles: Selection<Role>,
    /// Any-of clauses over a record's projects; every clause must accept.
    /// No clauses means no project constraint.
    pub projects: Vec<Selection<Project>>,
    pub levels: Selection<PerformanceBand>,
    pub kpi_range: ScoreRange,
}

impl FilterSet {
    /// Accept everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_departments<I: IntoIterator<Item = Department>>(mut self, values: I) -> Self {
        self.departments = Selection::only(values);
        self
    }

    pub fn with_roles<I: IntoIterator<Item = Role>>(mut self, values: I) -> Self {
        self.roles = Selection::only(values);
        self
    }

    pub fn with_projects<I: IntoIterator<Item = Project>>(mut self, values: I) -> Self {
        self.projects = vec![Selection::only(values)];
        self
    }

    pub fn with_levels<I: IntoIterator<Item = PerformanceBand>>(mut self, values: I) -> Self {
        self.levels = Selection::only(values);
        self
    }

    pub fn with_kpi_range(mut self, low: f64, high: f64) -> Self {
        self.kpi_range = ScoreRange::new(low, high);
        self
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.departments.contains(&employee.department)
            && self.roles.contains(&employee.role)
            && self
                .projects
                .iter()
                .all(|clause| clause.contains_any(&employee.projects))
            && self.levels.contains(&employee.performance_level)
            && self.kpi_range.contains(employee.overall_kpi)
    }

    /// Records passing every predicate, in input order.
    pub fn apply<'a, I>(&self, employees: I) -> Vec<&'a Employee>
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        employees.into_iter().filter(|e| self.matches(e)).collect()
    }

    /// One filter equivalent to applying `self` and then `other`.
    ///
    /// Project clauses are concatenated rather than intersected: an employee
    /// on both Atlas and Echo passes `{Atlas}` then `{Echo}`, but not `{}`.
    pub fn and(&self, other: &FilterSet) -> FilterSet {
        let projects = self
            .projects
            .iter()
            .chain(&other.projects)
            .filter(|clause| !clause.is_all())
            .cloned()
            .collect();
        FilterSet {
            departments: self.departments.intersect(&other.departments),
            roles: self.roles.intersect(&other.roles),
            projects,
            levels: self.levels.intersect(&other.levels),
            kpi_range: self.kpi_range.intersect(&other.kpi_range),
        }
    }
}

/// Selector choices as shown to the user: the `All` sentinel first, then the
/// domain in declaration order.
pub fn options<T: std::fmt::Display>(domain: &[T]) -> Vec<String> {
    std::iter::once("All".to_string())
        .chain(domain.iter().map(|v| v.to_string()))
        .collect()
}
