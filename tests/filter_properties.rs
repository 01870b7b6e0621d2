//! Property tests: filtering against feedback scored from a real target word.
//!
//! Feedback is generated the way the game itself scores a guess, so every
//! grid here is consistent with at least one word: the target.

use proptest::prelude::*;
use wordle_helper::wordbank::EMBEDDED_WORDBANK;
use wordle_helper::{
    Feedback, Grid, MAX_GUESSES, NoopObserver, WORD_LENGTH, WordEntry, filter_candidates,
    load_wordbank_from_str,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn wordbank() -> Vec<WordEntry> {
    load_wordbank_from_str(EMBEDDED_WORDBANK).unwrap()
}

/// Greens first, then yellows from the target's leftover letters.
fn score(guess: &str, target: &str) -> [Feedback; WORD_LENGTH] {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();
    let mut result = [Feedback::Absent; WORD_LENGTH];
    let mut leftover = Vec::new();
    for i in 0..WORD_LENGTH {
        if guess[i] == target[i] {
            result[i] = Feedback::Correct;
        } else {
            leftover.push(target[i]);
        }
    }
    for i in 0..WORD_LENGTH {
        if result[i] == Feedback::Correct {
            continue;
        }
        if let Some(pos) = leftover.iter().position(|&c| c == guess[i]) {
            leftover.swap_remove(pos);
            result[i] = Feedback::Present;
        }
    }
    result
}

fn push_row(grid: &mut Grid, guess: &str, feedback: &[Feedback; WORD_LENGTH]) {
    let row = grid.active_row();
    for c in guess.chars() {
        grid.add_letter(c);
    }
    for (col, &f) in feedback.iter().enumerate() {
        grid.set_feedback(row, col, f);
    }
    grid.submit_guess();
}

fn filter(candidates: &[WordEntry], grid: &Grid) -> Vec<WordEntry> {
    filter_candidates(candidates, grid, &mut NoopObserver)
}

/// Index of the target plus up to five guess indices into the word bank.
fn arb_game(len: usize) -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..len, prop::collection::vec(0..len, 1..MAX_GUESSES))
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// The target is never filtered out, however many rows are filled.
    #[test]
    fn target_always_survives((target, guesses) in arb_game(wordbank().len())) {
        let words = wordbank();
        let target = &words[target].word;
        let mut grid = Grid::new();
        for &g in &guesses {
            let guess = &words[g].word;
            push_row(&mut grid, guess, &score(guess, target));
            let result = filter(&words, &grid);
            prop_assert!(result.iter().any(|e| &e.word == target));
        }
    }

    /// Each extra consistent row keeps a subset of the previous survivors,
    /// in word bank order.
    #[test]
    fn adding_rows_only_narrows((target, guesses) in arb_game(wordbank().len())) {
        let words = wordbank();
        let target = &words[target].word;
        let mut grid = Grid::new();
        let mut previous = filter(&words, &grid);
        prop_assert_eq!(&previous, &words);
        for &g in &guesses {
            let guess = &words[g].word;
            push_row(&mut grid, guess, &score(guess, target));
            let current = filter(&words, &grid);
            prop_assert!(current.len() <= previous.len());
            let mut rest = previous.iter();
            for entry in &current {
                prop_assert!(rest.any(|p| p == entry));
            }
            previous = current;
        }
    }

    /// Filtering the survivors again changes nothing.
    #[test]
    fn filtering_is_idempotent((target, guesses) in arb_game(wordbank().len())) {
        let words = wordbank();
        let target = &words[target].word;
        let mut grid = Grid::new();
        for &g in &guesses {
            let guess = &words[g].word;
            push_row(&mut grid, guess, &score(guess, target));
        }
        let once = filter(&words, &grid);
        let twice = filter(&once, &grid);
        prop_assert_eq!(once, twice);
    }

    /// With one row: greens pin, yellows are present elsewhere, and a letter
    /// marked both positive and absent appears exactly as often as it is
    /// marked positive.
    #[test]
    fn single_row_laws(target in 0usize..200, guess in 0usize..200) {
        let words = wordbank();
        let target = &words[target % words.len()].word;
        let guess = &words[guess % words.len()].word;
        let feedback = score(guess, target);
        let mut grid = Grid::new();
        push_row(&mut grid, guess, &feedback);

        let letters: Vec<char> = guess.chars().collect();
        for entry in filter(&words, &grid) {
            let word: Vec<char> = entry.word.chars().collect();
            for (i, &f) in feedback.iter().enumerate() {
                match f {
                    Feedback::Correct => prop_assert_eq!(word[i], letters[i]),
                    Feedback::Present => {
                        prop_assert_ne!(word[i], letters[i]);
                        prop_assert!(word.contains(&letters[i]));
                    }
                    _ => {}
                }
            }
            for &letter in &letters {
                let marked: Vec<Feedback> = letters
                    .iter()
                    .zip(feedback.iter())
                    .filter(|(c, _)| **c == letter)
                    .map(|(_, f)| *f)
                    .collect();
                let positive = marked.iter().filter(|f| f.is_positive()).count();
                let count = word.iter().filter(|&&c| c == letter).count();
                if marked.contains(&Feedback::Absent) {
                    prop_assert_eq!(count, positive);
                } else {
                    prop_assert!(count >= positive);
                }
            }
        }
    }
}

#[test]
fn empty_grid_returns_full_list() {
    let words = wordbank();
    assert_eq!(filter(&words, &Grid::new()), words);
}

#[test]
fn score_handles_repeated_letters() {
    use Feedback::{Absent, Correct, Present};
    assert_eq!(
        score("geese", "those"),
        [Absent, Absent, Absent, Correct, Correct]
    );
    assert_eq!(
        score("eerie", "there"),
        [Present, Absent, Present, Absent, Correct]
    );
}
