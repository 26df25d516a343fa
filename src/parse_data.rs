use crate::{error::GatherError, pause_positions::PausePositions};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which grammar the compilation unit is parsed with. Recorded for the
/// debugger front end; what the modes mean is the parser's business.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SourceKind {
    Program,
    Module,
}

/// Everything a parse pass records for the debugger about one compilation
/// unit.
#[derive(Clone, Debug)]
pub struct DebuggerParseData {
    pub kind: SourceKind,
    pub pause_positions: PausePositions,
}

impl DebuggerParseData {
    #[must_use]
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            pause_positions: PausePositions::new(),
        }
    }
}

/// Lets `populate` (the caller's parse pass) fill fresh parse data, then
/// sorts and validates the recorded pause positions. Afterwards the data is
/// ready for queries and must not be mutated again.
pub fn gather_parse_data<E, F>(
    kind: SourceKind,
    populate: F,
) -> Result<DebuggerParseData, GatherError<E>>
where
    F: FnOnce(&mut DebuggerParseData) -> Result<(), E>,
{
    let mut data = DebuggerParseData::new(kind);
    populate(&mut data).map_err(GatherError::Parse)?;
    data.pause_positions.sort();
    data.pause_positions
        .validate()
        .map_err(GatherError::Malformed)?;
    debug!(
        "Gathered {} pause positions for a {:?} source.",
        data.pause_positions.len(),
        data.kind,
    );
    Ok(data)
}
