pub mod diagnostic;
pub mod error;
pub mod event;
pub mod ids;
pub mod period;
pub mod record;
pub mod side;

pub use diagnostic::*;
pub use error::{Error, Result};
pub use event::*;
pub use ids::*;
pub use period::*;
pub use record::*;
pub use side::*;
