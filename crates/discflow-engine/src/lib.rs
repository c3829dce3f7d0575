//! Reconstruction of a game from its two team event streams.
//!
//! Each team's stream is split into point segments, the segments are paired
//! home-to-away, and every pair is replayed through the point state machine.
//! All state lives in a per-game [`GameContext`], so games can be parsed on
//! any number of threads.

pub mod context;
pub mod cursor;
pub mod error;
pub mod game;
pub mod point;
pub mod reconcile;
pub mod segment;

pub use context::GameContext;
pub use cursor::{DualCursor, PointStart};
pub use error::{Error, Result};
pub use game::{parse_game, parse_payload};
pub use point::{Origin, PointMachine};
pub use reconcile::{GameResult, reconcile, tally};
pub use segment::{Segments, segments};
