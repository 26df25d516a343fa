use derive_more::{Deref, DerefMut, From};
use extension_trait::extension_trait;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    ops::Range,
};
use unicode_segmentation::UnicodeSegmentation;

/// The offset of a character in a string as the number of bytes preceding it in
/// UTF-8 encoding.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deref,
    DerefMut,
    Deserialize,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[from(forward)]
pub struct Offset(pub usize);

/// A character's coordinates in a source text.
///
/// Positions are ordered by line, then character, then offset. For positions
/// in the same text, line/character order and offset order agree; the offset
/// only acts as the finest-grained tiebreak.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct SourcePosition {
    /// Zero-based line index (`\n`-separated)
    pub line: usize,
    /// Zero-based character index (counting grapheme clusters)
    pub character: usize,
    /// Byte offset of the character in the source text
    pub offset: Offset,
}
impl SourcePosition {
    #[must_use]
    pub const fn new(line: usize, character: usize, offset: Offset) -> Self {
        Self {
            line,
            character,
            offset,
        }
    }
}
impl Display for SourcePosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

#[extension_trait]
pub impl RangeOfSourcePositions for Range<SourcePosition> {
    fn format(&self) -> String {
        format!("{} – {}", self.start, self.end)
    }
}

#[must_use]
pub fn line_start_offsets_raw<S: AsRef<str>>(text: S) -> Vec<Offset> {
    let mut offsets = vec![Offset(0)];
    offsets.extend(
        text.as_ref()
            .bytes()
            .enumerate()
            .filter(|(_, it)| it == &b'\n')
            .map(|(index, _)| Offset(index + 1)),
    );
    offsets
}

#[must_use]
pub fn offset_to_position_raw<S, L>(text: S, line_start_offsets: L, mut offset: Offset) -> SourcePosition
where
    S: AsRef<str>,
    L: AsRef<[Offset]>,
{
    let text = text.as_ref();
    let line_start_offsets = line_start_offsets.as_ref();

    if *offset > text.len() {
        *offset = text.len();
    }

    let line = line_start_offsets
        .binary_search(&offset)
        .unwrap_or_else(|i| i - 1);

    let character = text[*line_start_offsets[line]..*offset]
        .graphemes(true)
        .count();
    SourcePosition {
        line,
        character,
        offset,
    }
}

#[must_use]
pub fn position_for_line_character_raw<S, L>(
    text: S,
    line_start_offsets: L,
    line: usize,
    character: usize,
) -> Offset
where
    S: AsRef<str>,
    L: AsRef<[Offset]>,
{
    let text = text.as_ref();
    let line_start_offsets = line_start_offsets.as_ref();

    let line = line.min(line_start_offsets.len() - 1);
    let line_start = *line_start_offsets[line];
    let line_end = if line == line_start_offsets.len() - 1 {
        text.len()
    } else {
        *line_start_offsets[line + 1]
    };

    let character_offset = text[line_start..line_end]
        .grapheme_indices(true)
        .nth(character)
        .map_or(line_end - line_start, |(index, _)| index);
    Offset(line_start + character_offset)
}
