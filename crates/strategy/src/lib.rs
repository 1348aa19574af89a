pub mod aggregator;
pub mod config;
pub mod error;
pub mod indicators;
pub mod registry;
pub mod strategies;

pub use aggregator::aggregate;
pub use config::IndicatorConfig;
pub use error::{ComputationError, ConfigError};
pub use registry::{describe_strategies, StrategyRegistry};

use common::{PriceSeries, StrategyKind, StrategyResult};

/// All strategy implementations must satisfy this trait.
///
/// Implementations are pure functions of the series: no interior state, no
/// I/O, and no access to other strategies' output, so the analyzer may run
/// them on separate worker threads.
pub trait Strategy: Send + Sync {
    /// Which of the fixed strategies this is.
    fn kind(&self) -> StrategyKind;

    /// Name used as the report key and in logs.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Evaluate the whole series and classify its latest bar.
    ///
    /// Returns `ComputationError::InsufficientData` when the series is shorter
    /// than the indicator's warm-up.
    fn compute(&self, series: &PriceSeries) -> Result<StrategyResult, ComputationError>;
}
