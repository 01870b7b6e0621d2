use crate::game_state::{GameInterface, Session, UserAction};
use crate::grid::{Feedback, Grid, GuessRow, MAX_GUESSES, WORD_LENGTH};
use crate::solver::WordEntry;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

pub const DEFAULT_SHOW: usize = 10;

/// Wordle helper: record guesses and feedback, see which words remain
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a word list (`word,frequency` per line, or one word per line)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Use the line-oriented interface instead of the terminal grid
    #[arg(long)]
    pub cli: bool,

    /// Number of candidates to display
    #[arg(short = 'n', long = "show", default_value_t = DEFAULT_SHOW)]
    pub show: usize,

    /// Log file used while the terminal grid is active
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum LineInput {
    Actions(Vec<UserAction>),
    List,
    Invalid(String),
}

fn is_letters(word: &str) -> bool {
    !word.is_empty() && word.len() <= WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_pattern(pattern: &str) -> Option<Vec<Feedback>> {
    if pattern.chars().count() != WORD_LENGTH {
        return None;
    }
    pattern.chars().map(Feedback::from_char).collect()
}

fn parse_index(value: Option<&str>, max: usize) -> Option<usize> {
    let n: usize = value?.parse().ok()?;
    (1..=max).contains(&n).then(|| n - 1)
}

fn mark_actions(row: usize, feedback: &[Feedback]) -> impl Iterator<Item = UserAction> + '_ {
    feedback
        .iter()
        .enumerate()
        .map(move |(col, &feedback)| UserAction::SetFeedback { row, col, feedback })
}

/// Types `word` into the empty active row, marks it and submits it.
fn guess_actions(word: &str, feedback: &[Feedback], grid: &Grid) -> LineInput {
    let active = grid.active_row();
    if !grid.rows()[active].is_empty() {
        return LineInput::Invalid(
            "The active row already has letters; use 'back' to clear it.".to_string(),
        );
    }
    let mut actions: Vec<UserAction> = word.chars().map(UserAction::Letter).collect();
    actions.extend(mark_actions(active, feedback));
    actions.push(UserAction::Submit);
    LineInput::Actions(actions)
}

/// Turns one input line into actions against the current grid.
#[must_use]
pub fn parse_line(line: &str, grid: &Grid) -> LineInput {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return LineInput::Actions(Vec::new());
    };
    let first = first.to_lowercase();
    let second = tokens.next();
    let third = tokens.next();
    let active = grid.active_row();

    // a full guess with a pattern wins over command names ("cycle gyxxg")
    if first.len() == WORD_LENGTH
        && is_letters(&first)
        && let Some(feedback) = second.and_then(parse_pattern)
    {
        return guess_actions(&first, &feedback, grid);
    }

    match first.as_str() {
        "exit" | "quit" => LineInput::Actions(vec![UserAction::Exit]),
        "next" => LineInput::Actions(vec![UserAction::NewGame]),
        "back" => LineInput::Actions(vec![UserAction::Backspace]),
        "submit" => LineInput::Actions(vec![UserAction::Submit]),
        "list" => LineInput::List,
        "row" => match parse_index(second, MAX_GUESSES) {
            Some(row) => LineInput::Actions(vec![UserAction::SelectRow(row)]),
            None => LineInput::Invalid(format!("Usage: row <1-{MAX_GUESSES}>")),
        },
        "cycle" => match (
            parse_index(second, MAX_GUESSES),
            parse_index(third, WORD_LENGTH),
        ) {
            (Some(row), Some(col)) => {
                LineInput::Actions(vec![UserAction::CycleFeedback { row, col }])
            }
            _ => LineInput::Invalid(format!(
                "Usage: cycle <1-{MAX_GUESSES}> <1-{WORD_LENGTH}>"
            )),
        },
        "mark" => match second.and_then(parse_pattern) {
            Some(feedback) => LineInput::Actions(mark_actions(active, &feedback).collect()),
            None => LineInput::Invalid(
                "Usage: mark <pattern>, e.g. mark GYXXG (G=green, Y=yellow, X=gray)".to_string(),
            ),
        },
        word if is_letters(word) => match second {
            None => LineInput::Actions(word.chars().map(UserAction::Letter).collect()),
            Some(pattern) => match parse_pattern(pattern) {
                Some(_) => {
                    LineInput::Invalid("Invalid guess. Please enter 5 letters.".to_string())
                }
                None => LineInput::Invalid(
                    "Invalid feedback. Please enter 5 characters using G, Y, or X.".to_string(),
                ),
            },
        },
        _ => LineInput::Invalid(format!("Unknown command '{first}'. Type 'help' for commands.")),
    }
}

const HELP: &str = "\
Commands:
  <word> [pattern]   type letters; with a G/Y/X pattern, mark and submit the row
  mark <pattern>     mark the active row, e.g. mark XYXXG
  cycle <row> <col>  advance one letter's feedback
  back               remove the last letter (or step back a row)
  submit             move to the next row
  row <n>            make row n active
  list               show every remaining candidate
  next               start over
  exit               quit";

/// `"> 1  T A C O S  X Y X X Y"` for a row; empty slots show as `_`.
#[must_use]
pub fn format_row(index: usize, row: &GuessRow, active: bool) -> String {
    let cursor = if active { '>' } else { ' ' };
    let letters: Vec<String> = row
        .slots()
        .iter()
        .map(|s| s.letter.unwrap_or('_').to_string())
        .collect();
    let marks: Vec<String> = row
        .slots()
        .iter()
        .map(|s| s.feedback.to_char().to_string())
        .collect();
    format!(
        "{cursor} {}  {}  {}",
        index + 1,
        letters.join(" "),
        marks.join(" ")
    )
}

pub fn display_grid(grid: &Grid) {
    for (i, row) in grid.rows().iter().enumerate() {
        let active = i == grid.active_row();
        if active || !row.is_empty() {
            println!("{}", format_row(i, row, active));
        }
    }
}

pub fn display_candidates(candidates: &[WordEntry], total: usize, limit: usize) {
    println!("Possible candidates ({} of {total})", candidates.len());
    for entry in candidates.iter().take(limit) {
        println!("{} ({})", entry.word, entry.frequency);
    }
    if candidates.len() > limit {
        println!("...and {} more", candidates.len() - limit);
    }
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message(word_count: usize) {
    println!("New game started. Loaded {word_count} words.");
}

pub fn display_no_candidates_message() {
    println!("No candidates remain. Check your inputs.");
}

pub fn display_solution_found(solution: &str) {
    println!("Solution found: {solution}");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
    show: usize,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            show: DEFAULT_SHOW,
        }
    }

    #[must_use]
    pub fn with_show(mut self, show: usize) -> Self {
        self.show = show;
        self
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_actions(&mut self, session: &Session) -> Vec<UserAction> {
        println!("\nEnter a command ('help' for the list):");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => return vec![UserAction::Exit],
            Ok(_) => {}
        }
        if input.trim().eq_ignore_ascii_case("help") {
            println!("{HELP}");
            return Vec::new();
        }
        match parse_line(&input, session.grid()) {
            LineInput::Actions(actions) => actions,
            LineInput::List => {
                let filtered = session.filtered();
                display_candidates(filtered, session.candidates().len(), filtered.len());
                Vec::new()
            }
            LineInput::Invalid(message) => {
                println!("{message}");
                Vec::new()
            }
        }
    }

    fn display_session(&mut self, session: &Session) {
        display_grid(session.grid());
        let filtered = session.filtered();
        display_candidates(filtered, session.candidates().len(), self.show);
        match filtered {
            [] => display_no_candidates_message(),
            [only] => display_solution_found(&only.word),
            _ => {}
        }
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        display_new_game_message(word_count);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
