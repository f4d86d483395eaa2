// Seeded synthetic dataset: the employee table and the monthly trend series.
//
// `generate` is deterministic for a given `GeneratorParams`. `dataset`
// memoizes it so repeated renders in one process reuse the identical table
// instead of drawing a fresh one.
use crate::config::ScoringConfig;
use crate::metrics;
use crate::types::{BaseRecord, Dataset, Department, Employee, Project, Role, TrendPoint};
use crate::util::round1;
use chrono::Month;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_EMPLOYEES: usize = 20;

const FIRST_NAMES: [&str; 20] = [
    "Alice", "Bob", "Clara", "David", "Eva", "Frank", "Grace", "Henry", "Iris", "James", "Karen",
    "Leo", "Mia", "Nathan", "Olivia", "Paul", "Quinn", "Rachel", "Sam", "Tina",
];
const SURNAMES: [&str; 20] = [
    "Johnson", "Smith", "Lee", "Park", "Torres", "Müller", "Kim", "Brown", "Chen", "Wilson",
    "Patel", "Martinez", "Nguyen", "Scott", "Davis", "Zhang", "Adams", "Green", "Taylor", "White",
];

const MAX_PROJECTS_PER_EMPLOYEE: usize = 2;
const TREND_FLOOR: i32 = 55;
const TREND_CEILING: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratorParams {
    pub seed: u64,
    pub employees: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            employees: DEFAULT_EMPLOYEES,
        }
    }
}

// One slot per parameter set; entries are never evicted or replaced.
static DATASET_CACHE: Lazy<Mutex<HashMap<GeneratorParams, Arc<Dataset>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Cached dataset for `params`, generated on first request.
///
/// The lock is released while generating. If two callers race on the same
/// params, the first insert wins and both get that `Arc`.
pub fn dataset(params: GeneratorParams) -> Arc<Dataset> {
    if let Some(hit) = lock_cache().get(&params) {
        debug!(seed = params.seed, employees = params.employees, "dataset cache hit");
        return Arc::clone(hit);
    }
    let fresh = Arc::new(generate(params));
    Arc::clone(lock_cache().entry(params).or_insert(fresh))
}

fn lock_cache() -> MutexGuard<'static, HashMap<GeneratorParams, Arc<Dataset>>> {
    DATASET_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Build the dataset from scratch. Same params, same output, every time.
pub fn generate(params: GeneratorParams) -> Dataset {
    let config = ScoringConfig::standard();
    let mut rng = StdRng::seed_from_u64(params.seed);

    let employees: Vec<Employee> = (0..params.employees)
        .map(|i| metrics::derive(draw_record(i, &mut rng), &config))
        .collect();
    let trend = draw_trend(&mut rng);

    info!(
        seed = params.seed,
        employees = employees.len(),
        trend_points = trend.len(),
        "generated synthetic dataset"
    );
    Dataset { employees, trend }
}

/// Display name for the `index`-th employee; the first twenty are unique
/// first/surname pairs, later ones recombine the same lists.
pub fn employee_name(index: usize) -> String {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = SURNAMES[(index + index / FIRST_NAMES.len()) % SURNAMES.len()];
    format!("{} {}", first, last)
}

/// Period labels `Jan`..`Dec` in calendar order.
pub fn months() -> Vec<&'static str> {
    let mut month = Month::January;
    let mut labels = Vec::with_capacity(12);
    for _ in 0..12 {
        labels.push(&month.name()[..3]);
        month = month.succ();
    }
    labels
}

fn draw_record(index: usize, rng: &mut StdRng) -> BaseRecord {
    let department = Department::ALL[index % Department::ALL.len()];
    let productivity_score = rng.gen_range(55..98) as f64;
    let role = Role::ALL[rng.gen_range(0..Role::ALL.len())];
    // Lower bound of 20 keeps the completion-rate denominator positive.
    let tasks_assigned: u32 = rng.gen_range(20..60);
    let avg_task_quality = round1(rng.gen_range(60.0..99.0));
    let on_time_rate = round1(rng.gen_range(55.0..100.0));
    let collaboration_score = round1(rng.gen_range(60.0..100.0));
    let initiative_score = round1(rng.gen_range(50.0..100.0));
    let self_assessment = round1(rng.gen_range(65.0..100.0));

    let project_count = rng.gen_range(0..=MAX_PROJECTS_PER_EMPLOYEE);
    let mut projects: Vec<Project> = Project::ALL
        .choose_multiple(rng, project_count)
        .copied()
        .collect();
    projects.sort();

    let fraction: f64 = rng.gen_range(0.55..=1.0);
    let tasks_completed = ((tasks_assigned as f64 * fraction) as u32).min(tasks_assigned);
    let tasks_overdue = rng.gen_range(0..=tasks_assigned - tasks_completed);

    BaseRecord {
        id: format!("E{}", 1000 + index),
        name: employee_name(index),
        department,
        role,
        projects,
        tasks_assigned,
        tasks_completed,
        tasks_overdue,
        avg_task_quality,
        on_time_rate,
        productivity_score,
        collaboration_score,
        initiative_score,
        self_assessment,
    }
}

fn draw_trend(rng: &mut StdRng) -> Vec<TrendPoint> {
    let months = months();
    let mut points = Vec::with_capacity(Department::ALL.len() * months.len());
    for department in Department::ALL {
        let mut score: i32 = rng.gen_range(68..82);
        for &month in &months {
            score = (score + rng.gen_range(-4..6)).clamp(TREND_FLOOR, TREND_CEILING);
            points.push(TrendPoint {
                month,
                department,
                score: score as u32,
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64, employees: usize) -> GeneratorParams {
        GeneratorParams { seed, employees }
    }

    #[test]
    fn same_seed_same_table() {
        let first = generate(params(7, 50));
        let second = generate(params(7, 50));
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(generate(params(1, 20)), generate(params(2, 20)));
    }

    #[test]
    fn cached_dataset_is_shared() {
        let p = params(9001, 30);
        let first = dataset(p);
        let second = dataset(p);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, generate(p));
    }

    #[test]
    fn concurrent_first_requests_share_one_dataset() {
        let p = params(4242, 40);
        let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(move || dataset(p))).collect();
        let results: Vec<Arc<Dataset>> = handles
            .into_iter()
            .map(|h| h.join().expect("generator thread"))
            .collect();
        for r in &results {
            assert!(Arc::ptr_eq(r, &results[0]));
        }
        assert!(Arc::ptr_eq(&results[0], &dataset(p)));
    }

    #[test]
    fn task_counts_stay_consistent() {
        let data = generate(params(3, 200));
        for e in &data.employees {
            assert!(e.tasks_assigned >= 20 && e.tasks_assigned < 60, "{}", e.id);
            assert!(e.tasks_completed <= e.tasks_assigned, "{}", e.id);
            assert!(
                e.tasks_overdue <= e.tasks_assigned - e.tasks_completed,
                "{}",
                e.id
            );
            // trunc(assigned * 0.55) is the fewest completions possible
            assert!(e.tasks_completed as f64 >= (e.tasks_assigned as f64 * 0.55).floor());
        }
    }

    #[test]
    fn base_scores_stay_in_documented_ranges() {
        let data = generate(params(11, 200));
        for e in &data.employees {
            assert!((55.0..=97.0).contains(&e.productivity_score));
            assert!((60.0..=99.0).contains(&e.avg_task_quality));
            assert!((55.0..=100.0).contains(&e.on_time_rate));
            assert!((60.0..=100.0).contains(&e.collaboration_score));
            assert!((50.0..=100.0).contains(&e.initiative_score));
            assert!(e.projects.len() <= MAX_PROJECTS_PER_EMPLOYEE);
            assert!(e.projects.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn departments_rotate_and_ids_follow_order() {
        let data = generate(params(42, 10));
        let depts: Vec<Department> = data.employees.iter().map(|e| e.department).collect();
        assert_eq!(&depts[..5], &Department::ALL);
        assert_eq!(&depts[5..], &Department::ALL);
        assert_eq!(data.employees[0].id, "E1000");
        assert_eq!(data.employees[9].id, "E1009");
        assert_eq!(data.employees[0].name, "Alice Johnson");
        assert_eq!(data.employees[5].name, "Frank Müller");
    }

    #[test]
    fn names_recombine_past_the_roster() {
        assert_eq!(employee_name(19), "Tina White");
        assert_eq!(employee_name(20), "Alice Smith");
    }

    #[test]
    fn trend_covers_every_department_and_month() {
        let data = generate(params(42, 20));
        assert_eq!(data.trend.len(), Department::ALL.len() * 12);
        let labels: Vec<&str> = data.trend[..12].iter().map(|p| p.month).collect();
        assert_eq!(labels, months());
        assert_eq!(labels.first(), Some(&"Jan"));
        assert_eq!(labels.last(), Some(&"Dec"));
        for point in &data.trend {
            assert!((55..=100).contains(&point.score));
        }
    }

    #[test]
    fn empty_roster_is_valid() {
        let data = generate(params(42, 0));
        assert!(data.employees.is_empty());
        assert_eq!(data.trend.len(), 60);
    }
}
