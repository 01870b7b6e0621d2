use crate::grid::{Feedback, Grid, GridChange};
use crate::info_log;
use crate::solver::{FilterObserver, NoopObserver, WordEntry, filter_candidates};
use std::sync::Arc;

/// One player's grid and the candidates consistent with it.
///
/// Every mutator forwards to the [`Grid`] and recomputes the filtered list
/// from the full candidate list whenever the change invalidates it.
pub struct Session {
    grid: Grid,
    words: Arc<[WordEntry]>,
    filtered: Vec<WordEntry>,
    observer: Option<Box<dyn FilterObserver>>,
}

impl Session {
    #[must_use]
    pub fn new(words: impl Into<Arc<[WordEntry]>>) -> Self {
        let words = words.into();
        Self {
            grid: Grid::new(),
            filtered: words.to_vec(),
            words,
            observer: None,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn FilterObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn initialize(&mut self) {
        self.grid.initialize();
        self.recompute();
    }

    pub fn set_active_row(&mut self, index: usize) {
        self.apply(|grid| grid.set_active_row(index));
    }

    /// Does not refilter, even when the letter completes the row; the row
    /// counts once its feedback changes or it is submitted.
    pub fn add_letter(&mut self, ch: char) {
        self.apply(|grid| grid.add_letter(ch));
    }

    pub fn remove_letter(&mut self) {
        self.apply(Grid::remove_letter);
    }

    pub fn cycle_feedback(&mut self, row: usize, col: usize) {
        self.apply(|grid| grid.cycle_feedback(row, col));
    }

    pub fn set_feedback(&mut self, row: usize, col: usize, feedback: Feedback) {
        self.apply(|grid| grid.set_feedback(row, col, feedback));
    }

    pub fn submit_guess(&mut self) {
        self.apply(Grid::submit_guess);
    }

    /// Refilters the full candidate list against the current grid.
    pub fn recompute(&mut self) {
        let mut noop = NoopObserver;
        let observer: &mut dyn FilterObserver = match self.observer.as_deref_mut() {
            Some(observer) => observer,
            None => &mut noop,
        };
        self.filtered = filter_candidates(&self.words, &self.grid, observer);
        info_log!(
            "{} of {} candidates remain",
            self.filtered.len(),
            self.words.len()
        );
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Candidates consistent with every complete row, most frequent first.
    #[must_use]
    pub fn filtered(&self) -> &[WordEntry] {
        &self.filtered
    }

    /// The full, unfiltered candidate list.
    #[must_use]
    pub fn candidates(&self) -> &[WordEntry] {
        &self.words
    }

    fn apply(&mut self, mutate: impl FnOnce(&mut Grid) -> GridChange) -> GridChange {
        let change = mutate(&mut self.grid);
        if change.invalidates_filter() {
            self.recompute();
        }
        change
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Letter(char),
    Backspace,
    Submit,
    CycleFeedback { row: usize, col: usize },
    SetFeedback { row: usize, col: usize, feedback: Feedback },
    SelectRow(usize),
    NewGame,
    Exit,
}

/// Trait for abstracting the game interface (CLI or TUI)
pub trait GameInterface {
    /// Next batch of actions. An empty batch means nothing to do yet.
    fn read_actions(&mut self, session: &Session) -> Vec<UserAction>;
    fn display_session(&mut self, session: &Session);
    fn display_new_game_message(&mut self, word_count: usize);
    fn display_exit_message(&mut self);
}

/// Applies one non-terminal action to the session.
pub fn apply_action(session: &mut Session, action: UserAction) {
    match action {
        UserAction::Letter(c) => session.add_letter(c),
        UserAction::Backspace => session.remove_letter(),
        UserAction::Submit => session.submit_guess(),
        UserAction::CycleFeedback { row, col } => session.cycle_feedback(row, col),
        UserAction::SetFeedback { row, col, feedback } => {
            session.set_feedback(row, col, feedback);
        }
        UserAction::SelectRow(row) => session.set_active_row(row),
        UserAction::NewGame => session.initialize(),
        UserAction::Exit => {}
    }
}

/// Main game loop - works with any GameInterface implementation
pub fn game_loop<I: GameInterface + ?Sized>(session: &mut Session, interface: &mut I) {
    interface.display_session(session);
    loop {
        let actions = interface.read_actions(session);
        if actions.is_empty() {
            continue;
        }
        for action in actions {
            match action {
                UserAction::Exit => {
                    interface.display_exit_message();
                    return;
                }
                UserAction::NewGame => {
                    session.initialize();
                    interface.display_new_game_message(session.candidates().len());
                }
                other => apply_action(session, other),
            }
        }
        interface.display_session(session);
    }
}
