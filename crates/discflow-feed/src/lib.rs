//! Input side of discflow: everything between raw stats-page text and typed
//! event streams.

pub mod clock;
pub mod corrections;
pub mod decode;
pub mod error;
pub mod payload;
pub mod roster;
pub mod schema;
pub mod source;

pub use clock::{ClockCorrection, ClockCorrections, ClockReading};
pub use corrections::{Corrected, Correction, CorrectionTable, GameSelector};
pub use decode::decode_events;
pub use error::{Error, Result};
pub use payload::{DecodedGame, FeedOptions, decode_payload};
pub use roster::{Resolved, RosterResolver};
pub use source::{DirectorySource, PayloadSource, collect_payload_files, game_id_from_path};
