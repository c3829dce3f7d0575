pub mod check;
pub mod codes;
pub mod corrections;
pub mod parse;
