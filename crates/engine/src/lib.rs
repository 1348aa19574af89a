pub mod analyzer;
pub mod provider;

pub use analyzer::Analyzer;
pub use provider::{StaticProvider, YahooClient};
