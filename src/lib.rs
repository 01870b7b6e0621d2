// Library interface for wordle-helper
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod grid;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{GameInterface, Session, UserAction, game_loop};
pub use grid::{Feedback, Grid, GridChange, MAX_GUESSES, WORD_LENGTH};
pub use solver::{FilterObserver, NoopObserver, WordEntry, filter_candidates};
pub use wordbank::{
    WordbankError, load_default_wordbank, load_wordbank_from_file, load_wordbank_from_str,
};
