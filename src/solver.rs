//! Constraint derivation and candidate filtering.
//!
//! Each complete grid row becomes a [`RowConstraint`]: a per-position
//! [`PositionPattern`] plus per-letter [`CountRule`]s. The filter runs the
//! full candidate list through every row's constraint, top to bottom.

use crate::grid::{Feedback, Grid, RowMarks, WORD_LENGTH};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One candidate word and its frequency weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordEntry {
    pub word: String,
    pub frequency: u64,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// What one row says about how often a letter occurs in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterRequirement {
    /// Marked only absent in the row.
    Excluded,
    /// Marked correct/present this many times and absent at least once.
    Exactly(u8),
    /// Marked correct/present this many times and never absent.
    AtLeast(u8),
}

/// Derives the per-letter count requirements of one complete row.
///
/// A letter that is correct or present `k` times and also absent somewhere in
/// the same row occurs exactly `k` times. Unset feedback counts as absent.
#[must_use]
pub fn letter_requirements(marks: &RowMarks) -> BTreeMap<char, LetterRequirement> {
    let mut tally: BTreeMap<char, (u8, bool)> = BTreeMap::new();
    for &(letter, feedback) in marks {
        let (positive, absent) = tally.entry(letter.to_ascii_lowercase()).or_default();
        if feedback.is_positive() {
            *positive += 1;
        } else {
            *absent = true;
        }
    }
    tally
        .into_iter()
        .map(|(letter, (positive, absent))| {
            let requirement = match (positive, absent) {
                (0, _) => LetterRequirement::Excluded,
                (k, true) => LetterRequirement::Exactly(k),
                (k, false) => LetterRequirement::AtLeast(k),
            };
            (letter, requirement)
        })
        .collect()
}

/// Allowed letters at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionRule {
    Pinned(char),
    /// Any letter except these. Empty means unconstrained.
    Excluding(BTreeSet<char>),
}

impl PositionRule {
    fn allows(&self, c: char) -> bool {
        match self {
            Self::Pinned(p) => *p == c,
            Self::Excluding(set) => !set.contains(&c),
        }
    }
}

/// Per-position letter test, rendered regex-style for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPattern {
    positions: [PositionRule; WORD_LENGTH],
}

impl PositionPattern {
    #[must_use]
    pub fn positions(&self) -> &[PositionRule; WORD_LENGTH] {
        &self.positions
    }

    #[must_use]
    pub fn matches(&self, word: &[char]) -> bool {
        word.len() == WORD_LENGTH
            && self
                .positions
                .iter()
                .zip(word)
                .all(|(rule, &c)| rule.allows(c))
    }
}

impl fmt::Display for PositionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("^")?;
        for rule in &self.positions {
            match rule {
                PositionRule::Pinned(c) => write!(f, "{c}")?,
                PositionRule::Excluding(set) if set.is_empty() => f.write_str(".")?,
                PositionRule::Excluding(set) => {
                    f.write_str("[^")?;
                    for c in set {
                        write!(f, "{c}")?;
                    }
                    f.write_str("]")?;
                }
            }
        }
        f.write_str("$")
    }
}

/// Count test a row applies to one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountRule {
    Exactly(u8),
    AtLeast(u8),
    AtMost(u8),
}

impl CountRule {
    fn allows(self, count: u8) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::AtMost(n) => count <= n,
        }
    }
}

/// Facts gathered from every complete row before any row is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridContext {
    pinned: [Option<char>; WORD_LENGTH],
    required: BTreeMap<char, u8>,
}

impl GridContext {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a RowMarks>) -> Self {
        let mut ctx = Self::default();
        for marks in rows {
            for (i, &(letter, feedback)) in marks.iter().enumerate() {
                if feedback == Feedback::Correct {
                    ctx.pinned[i] = Some(letter.to_ascii_lowercase());
                }
            }
            for (letter, requirement) in letter_requirements(marks) {
                if let LetterRequirement::Exactly(k) | LetterRequirement::AtLeast(k) = requirement
                {
                    let max = ctx.required.entry(letter).or_default();
                    *max = (*max).max(k);
                }
            }
        }
        ctx
    }

    /// Largest correct/present count any row requires for `letter`.
    #[must_use]
    pub fn required(&self, letter: char) -> Option<u8> {
        self.required.get(&letter).copied()
    }

    #[must_use]
    pub fn pinned(&self, index: usize) -> Option<char> {
        self.pinned.get(index).copied().flatten()
    }
}

/// Acceptance test derived from one complete row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowConstraint {
    pattern: PositionPattern,
    counts: BTreeMap<char, CountRule>,
}

impl RowConstraint {
    /// Builds the row's constraint. `ctx` protects letters that other rows
    /// require from this row's zero-exclusion, and frees positions that other
    /// rows pin from this row's exclusions.
    #[must_use]
    pub fn derive(marks: &RowMarks, ctx: &GridContext) -> Self {
        let requirements = letter_requirements(marks);
        let mut excluded = BTreeSet::new();
        let mut counts = BTreeMap::new();
        for (&letter, &requirement) in &requirements {
            match requirement {
                LetterRequirement::Exactly(k) => {
                    counts.insert(letter, CountRule::Exactly(k));
                }
                LetterRequirement::AtLeast(k) => {
                    counts.insert(letter, CountRule::AtLeast(k));
                }
                LetterRequirement::Excluded => match ctx.required(letter) {
                    Some(max) => {
                        counts.insert(letter, CountRule::AtMost(max));
                    }
                    None => {
                        excluded.insert(letter);
                    }
                },
            }
        }

        let positions = std::array::from_fn(|i| {
            let (letter, feedback) = marks[i];
            let letter = letter.to_ascii_lowercase();
            if feedback == Feedback::Correct {
                return PositionRule::Pinned(letter);
            }
            if ctx.pinned(i).is_some() {
                return PositionRule::Excluding(BTreeSet::new());
            }
            let mut set = excluded.clone();
            if feedback == Feedback::Present {
                set.insert(letter);
            }
            PositionRule::Excluding(set)
        });

        Self {
            pattern: PositionPattern { positions },
            counts,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &PositionPattern {
        &self.pattern
    }

    #[must_use]
    pub fn counts(&self) -> &BTreeMap<char, CountRule> {
        &self.counts
    }

    #[must_use]
    pub fn accepts(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
        if !self.pattern.matches(&chars) {
            return false;
        }
        self.counts.iter().all(|(&letter, &rule)| {
            let count = chars.iter().filter(|&&c| c == letter).count();
            rule.allows(u8::try_from(count).unwrap_or(u8::MAX))
        })
    }
}

/// Receives diagnostics from [`filter_candidates`]. Every method defaults to
/// doing nothing.
pub trait FilterObserver {
    fn row_skipped(&mut self, _row: usize) {}
    fn row_constraint(&mut self, _row: usize, _constraint: &RowConstraint) {}
    fn row_applied(&mut self, _row: usize, _before: usize, _after: usize) {}
}

pub struct NoopObserver;

impl FilterObserver for NoopObserver {}

/// Constraints of every complete row, top to bottom, with the row index.
#[must_use]
pub fn derive_constraints(grid: &Grid) -> Vec<(usize, RowConstraint)> {
    let rows: Vec<(usize, RowMarks)> = grid.complete_rows().collect();
    let ctx = GridContext::from_rows(rows.iter().map(|(_, marks)| marks));
    rows.iter()
        .map(|(i, marks)| (*i, RowConstraint::derive(marks, &ctx)))
        .collect()
}

/// Entries of `candidates` accepted by every complete row of `grid`, in their
/// original order.
pub fn filter_candidates(
    candidates: &[WordEntry],
    grid: &Grid,
    observer: &mut dyn FilterObserver,
) -> Vec<WordEntry> {
    for (i, row) in grid.rows().iter().enumerate() {
        if !row.is_complete() {
            observer.row_skipped(i);
        }
    }

    let mut survivors: Vec<&WordEntry> = candidates.iter().collect();
    for (i, constraint) in derive_constraints(grid) {
        observer.row_constraint(i, &constraint);
        let before = survivors.len();
        survivors.retain(|entry| constraint.accepts(&entry.word));
        observer.row_applied(i, before, survivors.len());
    }
    survivors.into_iter().cloned().collect()
}
