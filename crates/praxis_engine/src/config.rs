//! Engine configuration.

use praxis_value::ValueConfig;

/// How a spatial reference picks its farthest candidates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FarthestSelection {
    /// The `amount` most distant candidates, farthest first.
    #[default]
    MostDistant,
    /// Candidates at sorted positions `amount` down to 1, nearest excluded.
    ///
    /// Kept for content authored against the older selection walk.
    Legacy,
}

/// Configuration for requirement evaluation.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    /// Value sampling and term tunables.
    pub values: ValueConfig,

    /// Farthest-selection policy for spatial references.
    pub farthest_selection: FarthestSelection,

    /// Seed for random selection and sampling; entropy when absent.
    pub seed: Option<u64>,

    /// Log the first failing check of every unsatisfied event at debug level.
    pub trace_failures: bool,
}

impl EngineConfig {
    /// Creates a configuration with a fixed seed.
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Builder method to set value tunables.
    #[must_use]
    pub fn with_values(mut self, values: ValueConfig) -> Self {
        self.values = values;
        self
    }

    /// Builder method to set the farthest-selection policy.
    #[must_use]
    pub fn with_farthest_selection(mut self, selection: FarthestSelection) -> Self {
        self.farthest_selection = selection;
        self
    }

    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to enable/disable failure tracing.
    #[must_use]
    pub fn with_trace_failures(mut self, trace: bool) -> Self {
        self.trace_failures = trace;
        self
    }
}
