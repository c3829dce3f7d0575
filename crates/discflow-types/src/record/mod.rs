pub mod game;
pub mod motion;
pub mod point;
pub mod pull;
pub mod throw;

pub use game::*;
pub use motion::*;
pub use point::*;
pub use pull::*;
pub use throw::*;
