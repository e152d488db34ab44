//! Single-pass TrueSkill rating updates for matches between teams, with draws,
//! per-match skill drift and optional uncertainty-scaled performance noise.

pub mod config;
pub mod data_processing;
pub mod environment;
pub mod error;
pub mod numerical;
pub mod summary;
pub mod systems;
pub mod telemetry;

pub use config::RatingEnvironmentConfig;
pub use environment::{PlayerHandle, RatingEnvironment};
pub use error::{NumericalInstability, RatingError, Result};
pub use systems::EpUpdateReport;
