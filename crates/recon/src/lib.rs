//! `rollcall-recon`: roster/registration reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded datasets, returns the two report
//! tables. No CLI or IO dependencies.

pub mod aggregate;
pub mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod matcher;
pub mod model;
pub mod normalize;

pub use config::ReportConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{CellValue, Dataset, Report, ResultTable};
