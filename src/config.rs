// Scoring constants: the composite-score weight vector and the band table.
//
// These are deliberate process-wide constants, not user settings. The binary
// validates them once at startup and refuses to run if they are malformed.
use crate::types::PerformanceBand;

/// Tolerance used when checking that the weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weight of each input to the Overall KPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub productivity: f64,
    pub completion: f64,
    pub on_time: f64,
    pub quality: f64,
    pub collaboration: f64,
}

impl ScoringWeights {
    pub fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("productivity", self.productivity),
            ("completion", self.completion),
            ("on_time", self.on_time),
            ("quality", self.quality),
            ("collaboration", self.collaboration),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().map(|(_, w)| w).sum()
    }
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    productivity: 0.35,
    completion: 0.25,
    on_time: 0.20,
    quality: 0.20,
    collaboration: 0.0,
};

/// Inclusive lower bounds, highest first. The last entry must start at 0.
pub type BandTable = [(f64, PerformanceBand)];

pub const DEFAULT_BANDS: [(f64, PerformanceBand); 5] = [
    (90.0, PerformanceBand::Outstanding),
    (80.0, PerformanceBand::Excellent),
    (70.0, PerformanceBand::Good),
    (60.0, PerformanceBand::NeedsImprovement),
    (0.0, PerformanceBand::Critical),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub bands: &'static BandTable,
}

impl ScoringConfig {
    pub const fn standard() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            bands: &DEFAULT_BANDS,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.weights.as_array() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::NegativeWeight { name, weight });
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        let Some(&(last_bound, _)) = self.bands.last() else {
            return Err(ConfigError::EmptyBands);
        };
        if last_bound != 0.0 {
            return Err(ConfigError::BandsNotExhaustive { lowest: last_bound });
        }
        for pair in self.bands.windows(2) {
            let (upper, upper_band) = pair[0];
            let (lower, lower_band) = pair[1];
            if upper <= lower || upper_band <= lower_band {
                return Err(ConfigError::BandsOutOfOrder { at: upper });
            }
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("weight '{name}' must be a non-negative number, got {weight}")]
    NegativeWeight { name: &'static str, weight: f64 },
    #[error("scoring weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },
    #[error("band table is empty")]
    EmptyBands,
    #[error("band table must start at 0 to cover every score, lowest bound is {lowest}")]
    BandsNotExhaustive { lowest: f64 },
    #[error("band table must be strictly descending in bound and band near {at}")]
    BandsOutOfOrder { at: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid() {
        assert_eq!(ScoringConfig::standard().validate(), Ok(()));
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut config = ScoringConfig::standard();
        config.weights.collaboration = 0.10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightSum { .. })
        ));
    }

    #[test]
    fn rejects_negative_weight() {
        let mut config = ScoringConfig::standard();
        config.weights.quality = -0.1;
        config.weights.productivity = 0.65;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeWeight { name: "quality", .. })
        ));
    }

    #[test]
    fn rejects_band_table_that_leaves_low_scores_uncovered() {
        static PARTIAL: [(f64, PerformanceBand); 2] = [
            (80.0, PerformanceBand::Excellent),
            (50.0, PerformanceBand::Critical),
        ];
        let config = ScoringConfig {
            weights: DEFAULT_WEIGHTS,
            bands: &PARTIAL,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BandsNotExhaustive { lowest: 50.0 })
        );
    }

    #[test]
    fn rejects_unordered_band_table() {
        static SHUFFLED: [(f64, PerformanceBand); 3] = [
            (70.0, PerformanceBand::Good),
            (80.0, PerformanceBand::Excellent),
            (0.0, PerformanceBand::Critical),
        ];
        let config = ScoringConfig {
            weights: DEFAULT_WEIGHTS,
            bands: &SHUFFLED,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BandsOutOfOrder { at: 70.0 })
        );
    }
}
