// Integration tests for the wordle-helper application
// These tests verify that all modules work together correctly

use std::io::{Cursor, Write};
use wordle_helper::cli::CliInterface;
use wordle_helper::*;

fn wordbank(words: &[&str]) -> Vec<WordEntry> {
    let len = words.len() as u64;
    words
        .iter()
        .enumerate()
        .map(|(i, w)| WordEntry::new(*w, (len - i as u64) * 10))
        .collect()
}

fn remaining(session: &Session) -> Vec<&str> {
    session.filtered().iter().map(|e| e.word.as_str()).collect()
}

fn play(session: &mut Session, input: &str) {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()));
    game_loop(session, &mut interface);
}

#[test]
fn test_end_to_end_multi_row_game() {
    // Three guesses narrow the list down to the answer
    let mut session = Session::new(wordbank(&["essay", "ansae", "isnae", "tacos", "stare"]));

    play(&mut session, "tacos XYXXY\nstare YXYXG\nessay YXGGX\nexit\n");

    assert_eq!(remaining(&session), vec!["ansae"]);
    assert_eq!(session.grid().active_row(), 3);
    assert_eq!(session.grid().rows()[2].word(), "ESSAY");
}

#[test]
fn test_game_continues_after_single_candidate() {
    // A solved grid does not end the loop; the reader does
    let mut session = Session::new(wordbank(&["essay", "ansae", "isnae", "tacos", "stare"]));

    play(
        &mut session,
        "tacos XYXXY\nstare YXYXG\nessay YXGGX\nback\n",
    );

    // back steps from the empty fourth row to the third without clearing it
    assert_eq!(session.grid().active_row(), 2);
    assert_eq!(remaining(&session), vec!["ansae"]);
}

#[test]
fn test_input_is_case_insensitive() {
    let words = wordbank(&["essay", "ansae", "isnae", "tacos", "stare"]);
    let mut upper = Session::new(words.clone());
    let mut lower = Session::new(words);

    play(&mut upper, "TACOS XYXXY\nSTARE yxyxg\n");
    play(&mut lower, "tacos xyxxy\nstare YXYXG\n");

    assert_eq!(remaining(&upper), vec!["ansae", "isnae"]);
    assert_eq!(upper.filtered(), lower.filtered());
}

#[test]
fn test_typing_and_marking_without_submit() {
    let mut session = Session::new(wordbank(&["essay", "ansae", "isnae", "tacos", "stare"]));

    play(&mut session, "tac\nos\nmark xyxxy\n");

    // feedback changes refilter even before the row is submitted
    assert_eq!(session.grid().active_row(), 0);
    assert_eq!(remaining(&session), vec!["essay", "ansae", "isnae"]);
}

#[test]
fn test_editing_an_earlier_row_refilters() {
    let mut session = Session::new(wordbank(&["essay", "ansae", "isnae", "tacos", "stare"]));

    // A in TACOS goes from yellow to green; nothing left has A second
    play(&mut session, "tacos xyxxy\nstare yxyxg\nrow 1\ncycle 1 2\n");

    assert_eq!(session.grid().active_row(), 0);
    assert_eq!(
        session.grid().rows()[0].slots()[1].feedback,
        Feedback::Correct
    );
    assert!(remaining(&session).is_empty());
}

#[test]
fn test_next_starts_a_new_game() {
    let mut session = Session::new(wordbank(&["crane", "shout", "dully"]));

    play(&mut session, "crane xxxxx\nnext\n");

    assert_eq!(session.grid(), &Grid::new());
    assert_eq!(remaining(&session), vec!["crane", "shout", "dully"]);
}

#[test]
fn test_invalid_lines_change_nothing() {
    let mut session = Session::new(wordbank(&["crane", "shout"]));

    play(
        &mut session,
        "crane gyxz\ncran xxxxx\nrow 9\ncycle 1\nmark gg\nhello-world\nhelp\nlist\n",
    );

    assert_eq!(session.grid(), &Grid::new());
    assert_eq!(remaining(&session), vec!["crane", "shout"]);
}

#[test]
fn test_custom_wordbank_file_to_game() {
    // Integration test: Load custom wordbank file -> play game
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "word,frequency").unwrap();
    writeln!(file, "apple,10").unwrap();
    writeln!(file, "GRAPE,40").unwrap();
    writeln!(file, "lemon,30").unwrap();
    writeln!(file, "melon,20").unwrap();
    writeln!(file, "kiwi,99").unwrap();

    let words = load_wordbank_from_file(file.path()).unwrap();
    assert_eq!(words.len(), 4);
    assert_eq!(words[0].word, "grape");

    let mut session = Session::new(words);
    play(&mut session, "lemon ygygg\n");

    assert_eq!(remaining(&session), vec!["melon"]);
}

#[test]
fn test_default_wordbank_feeds_a_session() {
    let words = load_default_wordbank(None).unwrap();
    let total = words.len();
    let mut session = Session::new(words);

    play(&mut session, "crane xxxxx\n");

    assert_eq!(session.candidates().len(), total);
    assert!(session.filtered().len() < total);
    assert!(
        session
            .filtered()
            .iter()
            .all(|e| !e.word.contains(['c', 'r', 'a', 'n', 'e']))
    );
}
