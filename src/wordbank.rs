use crate::debug_log;
use crate::solver::WordEntry;
use crate::grid::WORD_LENGTH;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordlist.csv");

const APP_DIR: &str = "wordle-helper";
const USER_WORDLIST: &str = "wordlist.csv";

#[derive(Debug, Error)]
pub enum WordbankError {
    #[error("failed to read word list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid frequency '{value}'")]
    InvalidFrequency { line: usize, value: String },
    #[error("word list contains no five-letter words")]
    Empty,
}

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_header(word: &str, column: Option<&str>) -> bool {
    word.eq_ignore_ascii_case("word")
        && column.is_some_and(|c| c.eq_ignore_ascii_case("frequency"))
}

/// Non-negative number, fractional part dropped (`12.5` -> 12).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_frequency(value: &str) -> Option<u64> {
    let number: f64 = value.parse().ok()?;
    (number.is_finite() && number >= 0.0).then(|| number.trunc() as u64)
}

/// Parses `word,frequency` lines (comma, tab or whitespace separated).
///
/// A bare word gets frequency 0. Entries that are not five ASCII letters are
/// dropped. The result is stable-sorted by descending frequency.
pub fn load_wordbank_from_str(data: &str) -> Result<Vec<WordEntry>, WordbankError> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut entries = Vec::new();
    for (index, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty());
        let word = fields.next().unwrap_or_default();
        let column = fields.next();
        if index == 0 && is_header(word, column) {
            continue;
        }

        let frequency = match column {
            None => 0,
            Some(value) => parse_frequency(value).ok_or_else(|| {
                WordbankError::InvalidFrequency {
                    line: index + 1,
                    value: value.to_string(),
                }
            })?,
        };

        let word = word.to_lowercase();
        if !is_valid_word(&word) {
            debug_log!("line {}: skipping '{}'", index + 1, word);
            continue;
        }
        entries.push(WordEntry { word, frequency });
    }

    if entries.is_empty() {
        return Err(WordbankError::Empty);
    }
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    Ok(entries)
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<WordEntry>, WordbankError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| WordbankError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_wordbank_from_str(&data)
}

/// `<config_dir>/wordle-helper/wordlist.csv`, whether or not it exists.
#[must_use]
pub fn get_user_wordlist_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_WORDLIST))
}

/// Picks the word list: an explicit path, then the user list if present, then
/// the embedded list.
pub fn load_default_wordbank(explicit: Option<&Path>) -> Result<Vec<WordEntry>, WordbankError> {
    if let Some(path) = explicit {
        return load_wordbank_from_file(path);
    }
    if let Some(path) = get_user_wordlist_path()
        && path.is_file()
    {
        debug_log!("loading user word list from {}", path.display());
        return load_wordbank_from_file(&path);
    }
    load_wordbank_from_str(EMBEDDED_WORDBANK)
}
