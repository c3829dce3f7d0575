mod machine;
mod origin;

pub use machine::PointMachine;
pub use origin::{GOAL_LINE_Y, Origin, PENALTY_YARDS};
