//! Testing infrastructure for discflow integration tests.
//!
//! - `events`: shorthand constructors for stat-server events
//! - `script`: `PointScript`, one point written for both teams at once
//! - `game`: `GameBuilder`, rosters plus streams rendered as a stats-page payload
//! - `fixtures`: payload files on disk

pub mod events;
pub mod fixtures;
pub mod game;
pub mod script;

pub use game::GameBuilder;
pub use script::PointScript;
