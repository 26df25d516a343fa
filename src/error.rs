use crate::position::SourcePosition;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

/// A malformed pause-position index: scope entries and leaves don't bracket
/// properly. This is a defect in the parse pass that recorded the positions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PauseDataError {
    UnmatchedEnter { position: SourcePosition },
    UnmatchedLeave { position: SourcePosition },
}
impl Display for PauseDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedEnter { position } => {
                write!(f, "The scope entered at {position} is never left.")
            }
            Self::UnmatchedLeave { position } => {
                write!(f, "The scope left at {position} was never entered.")
            }
        }
    }
}
impl Error for PauseDataError {}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GatherError<E> {
    /// The parse pass itself failed; there is no usable parse data.
    Parse(E),
    /// The parse pass produced an improperly bracketed position stream.
    Malformed(PauseDataError),
}
impl<E: Display> Display for GatherError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::Malformed(error) => write!(f, "{error}"),
        }
    }
}
impl<E: Debug + Display> Error for GatherError<E> {}
