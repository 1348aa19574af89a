use thiserror::Error;

/// Why a single strategy could not produce a reading.
///
/// These never escape the analyzer: each one is folded into an error
/// `StrategyResult` for its strategy and the remaining strategies carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("insufficient data: need at least {required} bars, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("non-finite {0} value")]
    NonFinite(&'static str),
}

/// Problems loading or validating the indicator parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read indicator config at '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse indicator config at '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid indicator config: {0}")]
    Invalid(String),
}
