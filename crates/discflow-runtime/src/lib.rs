//! Configuration and batch orchestration for discflow.
//!
//! [`Config`] decides which corrections apply and how many workers run;
//! [`Batch`] fans payloads out over a rayon pool and gathers per-game
//! results and failures.

pub mod batch;
pub mod config;
pub mod error;

pub use batch::{Batch, BatchOutcome, BatchSummary, GameFailure};
pub use config::{Config, CorrectionEntry, resolve_config_path};
pub use error::{Error, Result};
