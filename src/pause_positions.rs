use crate::{error::PauseDataError, position::SourcePosition};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIs;
use tracing::trace;

/// How a pause position relates to the nesting structure of the source.
///
/// `Enter` must stay the first variant: records at equal offsets are
/// tie-broken by kind, and a scope's entry has to sort before everything else
/// recorded at the same position.
#[derive(
    Clone, Copy, Debug, Deserialize, EnumIs, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum PauseKind {
    /// Entry into a nested lexical scope, e.g. a function body.
    Enter,
    /// Exit out of a nested lexical scope.
    Leave,
    /// An ordinary breakable statement boundary.
    Statement,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PausePosition {
    pub kind: PauseKind,
    pub position: SourcePosition,
}

/// All positions in one compilation unit where a debugger may legally suspend
/// execution.
///
/// A parse pass appends records in any order (duplicates included), [`sort`]
/// runs exactly once afterwards, and the index is read-only from then on. All
/// queries assume it is sorted.
///
/// [`sort`]: Self::sort
#[derive(Clone, Debug, Default)]
pub struct PausePositions {
    positions: Vec<PausePosition>,
}

impl PausePositions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, kind: PauseKind, position: SourcePosition) {
        self.positions.push(PausePosition { kind, position });
    }

    /// Sorts all records by offset, tie-broken by kind. Idempotent.
    pub fn sort(&mut self) {
        self.positions
            .sort_unstable_by_key(|it| (it.position.offset, it.kind));
    }

    /// Checks that scope entries and leaves bracket properly.
    ///
    /// Run this after [`sort`]: the queries assume every `Enter` has a
    /// matching `Leave` behind it and answer `None` where a malformed index
    /// would otherwise send them past the end.
    ///
    /// [`sort`]: Self::sort
    pub fn validate(&self) -> Result<(), PauseDataError> {
        let mut open_scopes = vec![];
        for it in &self.positions {
            match it.kind {
                PauseKind::Enter => open_scopes.push(it.position),
                PauseKind::Leave => {
                    if open_scopes.pop().is_none() {
                        return Err(PauseDataError::UnmatchedLeave {
                            position: it.position,
                        });
                    }
                }
                PauseKind::Statement => {}
            }
        }
        match open_scopes.first() {
            Some(position) => Err(PauseDataError::UnmatchedEnter {
                position: *position,
            }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    #[must_use]
    pub fn positions(&self) -> &[PausePosition] {
        &self.positions
    }

    /// The index of the first record whose line/character coordinates are not
    /// less than the given ones, or `len()` if there is none. At an exact
    /// match, ties land on the first record recorded there.
    #[must_use]
    pub fn first_position_after(&self, line: usize, character: usize) -> usize {
        self.positions
            .partition_point(|it| (it.position.line, it.position.character) < (line, character))
    }

    /// The nearest position at or after `line`/`character` where the debugger
    /// can actually pause, or `None` if no such position remains.
    #[must_use]
    pub fn breakpoint_location_for_line_character(
        &self,
        line: usize,
        character: usize,
    ) -> Option<SourcePosition> {
        self.breakpoint_location_from(line, character, self.first_position_after(line, character))
    }

    fn breakpoint_location_from(
        &self,
        line: usize,
        character: usize,
        index: usize,
    ) -> Option<SourcePosition> {
        let first = self.positions.get(index)?;
        debug_assert!(
            line < first.position.line
                || (line == first.position.line && character <= first.position.character),
        );

        if first.position.line == line && first.position.character == character {
            // Exact match. A scope's entry is not itself a place to pause, so
            // slide forward to the first following record that isn't one.
            let mut it = first;
            let mut index = index;
            while it.kind.is_enter() {
                index += 1;
                it = self.positions.get(index)?;
            }
            return Some(it.position);
        }

        if !first.kind.is_enter() {
            return Some(first.position);
        }

        // The next record enters a nested scope. A query on the entry's own
        // line steps into the scope; a query on an earlier line skips the
        // whole scope and pauses behind its matching leave. `open_scopes`
        // counts the scopes still to be skipped over.
        let should_enter = first.position.line == line;
        let mut open_scopes: usize = if should_enter { 0 } else { 1 };
        for it in &self.positions[index + 1..] {
            if open_scopes > 0 {
                match it.kind {
                    PauseKind::Enter => open_scopes += 1,
                    PauseKind::Leave => open_scopes -= 1,
                    PauseKind::Statement => {}
                }
                continue;
            }

            if it.kind.is_enter() {
                open_scopes += 1;
                continue;
            }

            return Some(it.position);
        }
        None
    }

    /// Visits every unique resolved pause position in the given range, in
    /// ascending order. The end bound is exclusive and applies to the
    /// resolved coordinates as well: a record inside the range can resolve to
    /// a position beyond it, which is then dropped.
    pub fn for_each_breakpoint_location(
        &self,
        start_line: usize,
        start_character: usize,
        end_line: usize,
        end_character: usize,
        mut callback: impl FnMut(SourcePosition),
    ) {
        let is_after_end = |line: usize, character: usize| {
            line > end_line || (line == end_line && character >= end_character)
        };

        let mut unique_positions = FxHashSet::default();
        let start = self.first_position_after(start_line, start_character);
        for (index, it) in self.positions.iter().enumerate().skip(start) {
            if is_after_end(it.position.line, it.position.character) {
                break;
            }

            if let Some(resolved) =
                self.breakpoint_location_from(it.position.line, it.position.character, index)
            {
                if !is_after_end(resolved.line, resolved.character) {
                    unique_positions.insert(resolved);
                }
            }
        }
        trace!(
            "{} unique breakpoint locations between {start_line}:{start_character} and {end_line}:{end_character}",
            unique_positions.len(),
        );

        // Resolving can jump forward past whole scopes, so the resolved
        // positions are not in raw record order.
        for position in unique_positions.into_iter().sorted_unstable() {
            callback(position);
        }
    }
}
