// Derived columns: completion rate, Overall KPI, and performance level.
//
// Every function here is pure and only looks at the record it is given.
use crate::config::{BandTable, ScoringConfig, ScoringWeights};
use crate::types::{BaseRecord, Employee, PerformanceBand};
use crate::util::{ratio, round1};

/// Completed over assigned as a percentage, one decimal. Zero assigned gives 0.0.
pub fn completion_rate(completed: u32, assigned: u32) -> f64 {
    round1(ratio(completed as f64, assigned as f64) * 100.0)
}

/// Inputs to the composite score, in the order the weights are declared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub productivity: f64,
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub quality: f64,
    pub collaboration: f64,
}

pub fn composite_score(inputs: &ScoreInputs, weights: &ScoringWeights) -> f64 {
    round1(
        inputs.productivity * weights.productivity
            + inputs.completion_rate * weights.completion
            + inputs.on_time_rate * weights.on_time
            + inputs.quality * weights.quality
            + inputs.collaboration * weights.collaboration,
    )
}

/// First band whose inclusive lower bound is at or below `score`.
///
/// The table is scanned highest bound first, so a score sitting exactly on a
/// boundary lands in the higher band. Anything below every bound (negative or
/// NaN scores) falls through to the lowest band.
pub fn performance_band(score: f64, bands: &BandTable) -> PerformanceBand {
    bands
        .iter()
        .find(|(lower, _)| *lower <= score)
        .or(bands.last())
        .map(|(_, band)| *band)
        .unwrap_or(PerformanceBand::Critical)
}

/// Attach the derived columns to a freshly generated record.
pub fn derive(base: BaseRecord, config: &ScoringConfig) -> Employee {
    let completion_rate = completion_rate(base.tasks_completed, base.tasks_assigned);
    let overall_kpi = composite_score(
        &ScoreInputs {
            productivity: base.productivity_score,
            completion_rate,
            on_time_rate: base.on_time_rate,
            quality: base.avg_task_quality,
            collaboration: base.collaboration_score,
        },
        &config.weights,
    );
    let performance_level = performance_band(overall_kpi, config.bands);

    Employee {
        id: base.id,
        name: base.name,
        department: base.department,
        role: base.role,
        projects: base.projects,
        tasks_assigned: base.tasks_assigned,
        tasks_completed: base.tasks_completed,
        tasks_overdue: base.tasks_overdue,
        avg_task_quality: base.avg_task_quality,
        on_time_rate: base.on_time_rate,
        productivity_score: base.productivity_score,
        collaboration_score: base.collaboration_score,
        initiative_score: base.initiative_score,
        self_assessment: base.self_assessment,
        completion_rate,
        overall_kpi,
        performance_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BANDS, DEFAULT_WEIGHTS};
    use crate::types::{Department, Role};

    fn base(assigned: u32, completed: u32) -> BaseRecord {
        BaseRecord {
            id: "E1000".to_string(),
            name: "Alice Johnson".to_string(),
            department: Department::Engineering,
            role: Role::Senior,
            projects: vec![],
            tasks_assigned: assigned,
            tasks_completed: completed,
            tasks_overdue: 0,
            avg_task_quality: 70.0,
            on_time_rate: 90.0,
            productivity_score: 80.0,
            collaboration_score: 75.0,
            initiative_score: 60.0,
            self_assessment: 88.0,
        }
    }

    #[test]
    fn completion_rates_for_mixed_workloads() {
        let assigned = [10, 20, 0, 5, 8];
        let completed = [10, 10, 0, 5, 4];
        let rates: Vec<f64> = assigned
            .iter()
            .zip(completed.iter())
            .map(|(a, c)| completion_rate(*c, *a))
            .collect();
        assert_eq!(rates, vec![100.0, 50.0, 0.0, 100.0, 50.0]);
    }

    #[test]
    fn completion_rate_rounds_to_one_decimal() {
        assert_eq!(completion_rate(2, 3), 66.7);
        assert_eq!(completion_rate(1, 7), 14.3);
    }

    #[test]
    fn weighted_score_lands_in_excellent() {
        let inputs = ScoreInputs {
            productivity: 80.0,
            completion_rate: 100.0,
            on_time_rate: 90.0,
            quality: 70.0,
            collaboration: 50.0,
        };
        let score = composite_score(&inputs, &DEFAULT_WEIGHTS);
        assert_eq!(score, 85.0);
        assert_eq!(
            performance_band(score, &DEFAULT_BANDS),
            PerformanceBand::Excellent
        );
    }

    #[test]
    fn collaboration_weight_contributes_when_set() {
        let weights = ScoringWeights {
            productivity: 0.30,
            completion: 0.20,
            on_time: 0.20,
            quality: 0.20,
            collaboration: 0.10,
        };
        let inputs = ScoreInputs {
            productivity: 100.0,
            completion_rate: 100.0,
            on_time_rate: 100.0,
            quality: 100.0,
            collaboration: 0.0,
        };
        assert_eq!(composite_score(&inputs, &weights), 90.0);
    }

    #[test]
    fn boundary_scores_belong_to_the_higher_band() {
        let cases = [
            (0.0, PerformanceBand::Critical),
            (59.9, PerformanceBand::Critical),
            (60.0, PerformanceBand::NeedsImprovement),
            (69.9, PerformanceBand::NeedsImprovement),
            (70.0, PerformanceBand::Good),
            (80.0, PerformanceBand::Excellent),
            (89.9, PerformanceBand::Excellent),
            (90.0, PerformanceBand::Outstanding),
            (100.0, PerformanceBand::Outstanding),
        ];
        for (score, expected) in cases {
            assert_eq!(performance_band(score, &DEFAULT_BANDS), expected, "score {score}");
        }
    }

    #[test]
    fn bands_are_monotonic_across_the_score_range() {
        let mut previous = performance_band(0.0, &DEFAULT_BANDS);
        for tenth in 0..=1000 {
            let score = tenth as f64 / 10.0;
            let band = performance_band(score, &DEFAULT_BANDS);
            assert!(band >= previous, "band dropped at {score}");
            previous = band;
        }
    }

    #[test]
    fn out_of_range_scores_fall_back_to_lowest_band() {
        assert_eq!(
            performance_band(-3.0, &DEFAULT_BANDS),
            PerformanceBand::Critical
        );
        assert_eq!(
            performance_band(f64::NAN, &DEFAULT_BANDS),
            PerformanceBand::Critical
        );
    }

    #[test]
    fn derive_fills_every_derived_column() {
        let employee = derive(base(10, 10), &ScoringConfig::standard());
        assert_eq!(employee.completion_rate, 100.0);
        assert_eq!(employee.overall_kpi, 85.0);
        assert_eq!(employee.performance_level, PerformanceBand::Excellent);
        assert_eq!(employee.tasks_assigned, 10);
        assert_eq!(employee.name, "Alice Johnson");
    }

    #[test]
    fn derive_guards_zero_assigned() {
        let employee = derive(base(0, 0), &ScoringConfig::standard());
        assert_eq!(employee.completion_rate, 0.0);
        // 80*.35 + 0*.25 + 90*.20 + 70*.20
        assert_eq!(employee.overall_kpi, 60.0);
        assert_eq!(employee.performance_level, PerformanceBand::NeedsImprovement);
    }
}
