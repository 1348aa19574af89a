mod analysis;
mod health;

pub use analysis::analysis_router;
pub use health::health_router;
