//! Guess grid state: six rows of five letter slots plus the active-row cursor.
//!
//! Every mutator is infallible. Input that cannot apply (a full row, an empty
//! slot, an out-of-range index) leaves the grid untouched and reports
//! [`GridChange::Unchanged`]. The owner of the grid decides from the returned
//! [`GridChange`] whether the candidate filter has to be recomputed.

use crate::debug_log;

pub const MAX_GUESSES: usize = 6;
pub const WORD_LENGTH: usize = 5;

/// Feedback the player recorded for one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Feedback {
    /// No feedback recorded yet.
    #[default]
    Unset,
    /// Gray
    Absent,
    /// Yellow
    Present,
    /// Green
    Correct,
}

impl Feedback {
    /// Next state in the click cycle `Present -> Correct -> Absent -> Present`.
    ///
    /// `Unset` enters the cycle at `Present` and is never produced again.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Unset | Self::Absent => Self::Present,
            Self::Present => Self::Correct,
            Self::Correct => Self::Absent,
        }
    }

    /// Parses `G`, `Y` or `X` (case-insensitive).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Unset => '.',
            Self::Absent => 'X',
            Self::Present => 'Y',
            Self::Correct => 'G',
        }
    }

    /// True for `Correct` and `Present`.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Correct | Self::Present)
    }
}

/// What a grid mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChange {
    Unchanged,
    CursorMoved,
    LetterAdded,
    LetterCleared,
    FeedbackChanged,
    RowAdvanced,
}

impl GridChange {
    /// Whether the filtered candidate list is stale after this change.
    #[must_use]
    pub fn invalidates_filter(self) -> bool {
        matches!(
            self,
            Self::LetterCleared | Self::FeedbackChanged | Self::RowAdvanced
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LetterSlot {
    pub letter: Option<char>,
    pub feedback: Feedback,
}

impl LetterSlot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

/// Letter and feedback of every position in a complete row.
pub type RowMarks = [(char, Feedback); WORD_LENGTH];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuessRow {
    slots: [LetterSlot; WORD_LENGTH],
}

impl GuessRow {
    #[must_use]
    pub fn slots(&self) -> &[LetterSlot; WORD_LENGTH] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, col: usize) -> Option<&LetterSlot> {
        self.slots.get(col)
    }

    /// A row is complete when every slot holds a letter.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.letter.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(LetterSlot::is_empty)
    }

    /// The row's letters as typed, with `' '` for empty slots.
    #[must_use]
    pub fn word(&self) -> String {
        self.slots.iter().map(|s| s.letter.unwrap_or(' ')).collect()
    }

    /// `(letter, feedback)` for each position, or `None` if the row is incomplete.
    #[must_use]
    pub fn marks(&self) -> Option<RowMarks> {
        let mut marks = [(' ', Feedback::Unset); WORD_LENGTH];
        for (mark, slot) in marks.iter_mut().zip(&self.slots) {
            *mark = (slot.letter?, slot.feedback);
        }
        Some(marks)
    }

    fn add_letter(&mut self, letter: char) -> GridChange {
        match self.slots.iter_mut().find(|s| s.is_empty()) {
            Some(slot) => {
                slot.letter = Some(letter);
                GridChange::LetterAdded
            }
            None => GridChange::Unchanged,
        }
    }

    fn clear_last_letter(&mut self) -> GridChange {
        match self.slots.iter_mut().rev().find(|s| !s.is_empty()) {
            Some(slot) => {
                *slot = LetterSlot::default();
                GridChange::LetterCleared
            }
            None => GridChange::Unchanged,
        }
    }
}

/// Six guess rows and the cursor marking the row being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: [GuessRow; MAX_GUESSES],
    active_row: usize,
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every slot and moves the cursor to the first row.
    pub fn initialize(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn rows(&self) -> &[GuessRow; MAX_GUESSES] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&GuessRow> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn active_row(&self) -> usize {
        self.active_row
    }

    pub fn set_active_row(&mut self, index: usize) -> GridChange {
        if index >= MAX_GUESSES {
            debug_log!("set_active_row({index}) ignored: out of range");
            return GridChange::Unchanged;
        }
        if index == self.active_row {
            return GridChange::Unchanged;
        }
        self.active_row = index;
        GridChange::CursorMoved
    }

    /// Types `ch` into the first empty slot of the active row.
    pub fn add_letter(&mut self, ch: char) -> GridChange {
        if !ch.is_ascii_alphabetic() {
            return GridChange::Unchanged;
        }
        self.rows[self.active_row].add_letter(ch.to_ascii_uppercase())
    }

    /// Clears the right-most letter of the active row, or steps back a row
    /// when the active row is already empty.
    pub fn remove_letter(&mut self) -> GridChange {
        let row = &mut self.rows[self.active_row];
        if row.is_empty() {
            if self.active_row > 0 {
                self.active_row -= 1;
                return GridChange::CursorMoved;
            }
            return GridChange::Unchanged;
        }
        row.clear_last_letter()
    }

    /// Advances the feedback of a lettered slot to its next state.
    pub fn cycle_feedback(&mut self, row: usize, col: usize) -> GridChange {
        let Some(slot) = self.slot_mut(row, col) else {
            return GridChange::Unchanged;
        };
        if slot.is_empty() {
            return GridChange::Unchanged;
        }
        slot.feedback = slot.feedback.next();
        GridChange::FeedbackChanged
    }

    /// Sets the feedback of a lettered slot.
    pub fn set_feedback(&mut self, row: usize, col: usize, feedback: Feedback) -> GridChange {
        let Some(slot) = self.slot_mut(row, col) else {
            return GridChange::Unchanged;
        };
        if slot.is_empty() || slot.feedback == feedback {
            return GridChange::Unchanged;
        }
        slot.feedback = feedback;
        GridChange::FeedbackChanged
    }

    /// Moves the cursor to the next row. Never validates the current row.
    pub fn submit_guess(&mut self) -> GridChange {
        if self.active_row + 1 >= MAX_GUESSES {
            return GridChange::Unchanged;
        }
        self.active_row += 1;
        GridChange::RowAdvanced
    }

    /// Complete rows top to bottom, with their index.
    pub fn complete_rows(&self) -> impl Iterator<Item = (usize, RowMarks)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.marks().map(|marks| (i, marks)))
    }

    fn slot_mut(&mut self, row: usize, col: usize) -> Option<&mut LetterSlot> {
        self.rows.get_mut(row)?.slots.get_mut(col)
    }
}
