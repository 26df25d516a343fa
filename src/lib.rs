pub use self::{
    error::{GatherError, PauseDataError},
    parse_data::{gather_parse_data, DebuggerParseData, SourceKind},
    pause_positions::{PauseKind, PausePosition, PausePositions},
    position::{Offset, SourcePosition},
};

pub mod error;
pub mod parse_data;
pub mod pause_positions;
pub mod position;
